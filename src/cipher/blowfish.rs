//! src/cipher/blowfish.rs

use blowfish::Blowfish;

use super::cbc_mode::{check_mode_and_iv, decrypt_cbc};
use super::CipherBackend;
use crate::error::SpadeError;
use crate::model::{Algorithm, Mode};

const BLOWFISH_BLOCK: usize = 8;

/// Blowfish with any byte-aligned key from 32 to 448 bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlowfishBackend;

impl CipherBackend for BlowfishBackend {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Blowfish
    }

    fn block_size(&self) -> usize {
        BLOWFISH_BLOCK
    }

    fn accepts_key_bits(&self, key_bits: u32) -> bool {
        (32..=448).contains(&key_bits) && key_bits % 8 == 0
    }

    fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        iv: &[u8],
        mode: Mode,
    ) -> Result<Vec<u8>, SpadeError> {
        check_mode_and_iv(Algorithm::Blowfish, mode, iv)?;
        decrypt_cbc::<Blowfish>(BLOWFISH_BLOCK, ciphertext, key, iv)
    }
}
