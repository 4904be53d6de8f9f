//! src/analyzer/signatures.rs
//! Container magic numbers and encryption envelope markers.

use crate::consts::{
    DER_SEQUENCE_TAG, MIN_SIGNATURE_LEN, PDF_MAGIC, PGP_HEADER_MASK, RAR_MAGIC, SALTED_PREFIX,
    SEVEN_ZIP_MAGIC, ZIP_MAGIC,
};

/// Well-known non-encrypted container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Zip,
    Pdf,
    Rar,
    SevenZip,
}

impl Container {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Container::Zip => "ZIP archive",
            Container::Pdf => "PDF document",
            Container::Rar => "RAR archive",
            Container::SevenZip => "7-Zip archive",
        }
    }
}

/// Wrappers that commonly carry AES ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// OpenSSL `enc` output (`Salted__` + 8-byte salt).
    OpenSslSalted,
    /// OpenPGP packet header (top two bits set).
    Pgp,
    /// ASN.1 DER SEQUENCE, as used by PKCS#7/CMS.
    Der,
}

impl Envelope {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Envelope::OpenSslSalted => "OpenSSL encrypted file",
            Envelope::Pgp => "GPG/PGP encrypted file",
            Envelope::Der => "PKCS#7/CMS (DER) data",
        }
    }

    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Envelope::OpenSslSalted => "\"Salted__\" prefix",
            Envelope::Pgp => "PGP packet header",
            Envelope::Der => "DER SEQUENCE tag",
        }
    }
}

/// Container format of `data`, if its magic is recognised.
#[must_use]
pub fn detect_container(data: &[u8]) -> Option<Container> {
    if data.len() < MIN_SIGNATURE_LEN {
        return None;
    }
    [
        (ZIP_MAGIC, Container::Zip),
        (PDF_MAGIC, Container::Pdf),
        (RAR_MAGIC, Container::Rar),
        (SEVEN_ZIP_MAGIC, Container::SevenZip),
    ]
    .into_iter()
    .find(|(magic, _)| data.starts_with(magic))
    .map(|(_, container)| container)
}

/// Envelope marker at the head of `data`, checked in the order OpenSSL, PGP,
/// DER.
#[must_use]
pub fn detect_envelope(data: &[u8]) -> Option<Envelope> {
    if data.len() < MIN_SIGNATURE_LEN {
        return None;
    }
    if data.starts_with(SALTED_PREFIX) {
        Some(Envelope::OpenSslSalted)
    } else if data[0] & PGP_HEADER_MASK == PGP_HEADER_MASK {
        Some(Envelope::Pgp)
    } else if data[0] == DER_SEQUENCE_TAG {
        Some(Envelope::Der)
    } else {
        None
    }
}
