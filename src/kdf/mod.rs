//! # Key Derivation Functions (KDF)
//!
//! Turns a candidate password into cipher key material for dictionary, rule
//! and mask attacks.
//!
//! ## Modules
//!
//! - [`digest`] - salted SHA-256, stretched by re-hashing for keys longer than 32 bytes
//! - [`pbkdf2`] - PBKDF2-HMAC-SHA256
//! - [`scrypt`] - scrypt
//! - [`argon2`] - Argon2id
//!
//! All derivations write into a [`Zeroizing`] buffer so candidate keys are
//! wiped as soon as a worker moves on.

pub mod argon2;
pub mod digest;
pub mod pbkdf2;
pub mod scrypt;

use zeroize::Zeroizing;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ARGON2_M_COST, DEFAULT_ARGON2_P_COST, DEFAULT_ARGON2_T_COST, DEFAULT_KDF_SALT, DEFAULT_PBKDF2_ITERATIONS, DEFAULT_SCRYPT_LOG_N, DEFAULT_SCRYPT_P,
    DEFAULT_SCRYPT_R,
};
use crate::error::SpadeError;

pub use self::argon2::derive_argon2_key;
pub use self::digest::derive_sha256_key;
pub use self::pbkdf2::derive_pbkdf2_key;
pub use self::scrypt::derive_scrypt_key;

/// Secret key bytes, zeroed on drop.
pub type KeyMaterial = Zeroizing<Vec<u8>>;

/// Password-to-key method named by an attack request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KeyDerivation {
    /// `SHA-256(password ‖ salt)`.
    Sha256 { salt: Vec<u8> },
    /// PBKDF2-HMAC-SHA256.
    Pbkdf2Sha256 { salt: Vec<u8>, iterations: u32 },
    /// scrypt with `N = 2^log_n`.
    Scrypt {
        salt: Vec<u8>,
        log_n: u8,
        r: u32,
        p: u32,
    },
    /// Argon2id v0x13; `m_cost` in KiB. The salt must be at least 8 bytes.
    Argon2id {
        salt: Vec<u8>,
        m_cost: u32,
        t_cost: u32,
        p_cost: u32,
    },
}

impl Default for KeyDerivation {
    fn default() -> Self {
        KeyDerivation::Sha256 { salt: Vec::new() }
    }
}

impl KeyDerivation {
    /// PBKDF2 with the default salt and iteration count.
    #[must_use]
    pub fn pbkdf2() -> Self {
        KeyDerivation::Pbkdf2Sha256 {
            salt: DEFAULT_KDF_SALT.to_vec(),
            iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
    }

    /// scrypt with the default salt and cost parameters.
    #[must_use]
    pub fn scrypt() -> Self {
        KeyDerivation::Scrypt {
            salt: DEFAULT_KDF_SALT.to_vec(),
            log_n: DEFAULT_SCRYPT_LOG_N,
            r: DEFAULT_SCRYPT_R,
            p: DEFAULT_SCRYPT_P,
        }
    }

    /// Argon2id with the default salt and costs.
    #[must_use]
    pub fn argon2id() -> Self {
        KeyDerivation::Argon2id {
            salt: DEFAULT_KDF_SALT.to_vec(),
            m_cost: DEFAULT_ARGON2_M_COST,
            t_cost: DEFAULT_ARGON2_T_COST,
            p_cost: DEFAULT_ARGON2_P_COST,
        }
    }

    /// Derive `key_len` bytes of key material from `password`.
    pub fn derive(&self, password: &str, key_len: usize) -> Result<KeyMaterial, SpadeError> {
        if key_len == 0 {
            return Err(SpadeError::Kdf("requested key length is zero".into()));
        }
        let mut out = Zeroizing::new(vec![0u8; key_len]);
        match self {
            KeyDerivation::Sha256 { salt } => derive_sha256_key(password, salt, &mut out),
            KeyDerivation::Pbkdf2Sha256 { salt, iterations } => {
                derive_pbkdf2_key(password, salt, *iterations, &mut out)?
            }
            KeyDerivation::Scrypt { salt, log_n, r, p } => {
                derive_scrypt_key(password, salt, *log_n, *r, *p, &mut out)?
            }
            KeyDerivation::Argon2id {
                salt,
                m_cost,
                t_cost,
                p_cost,
            } => derive_argon2_key(password, salt, *m_cost, *t_cost, *p_cost, &mut out)?,
        }
        Ok(out)
    }

    /// Short label for status text.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            KeyDerivation::Sha256 { .. } => "SHA-256",
            KeyDerivation::Pbkdf2Sha256 { .. } => "PBKDF2-HMAC-SHA256",
            KeyDerivation::Scrypt { .. } => "scrypt",
            KeyDerivation::Argon2id { .. } => "Argon2id",
        }
    }
}
