//! src/cipher/aes.rs

use aes::{Aes128, Aes192, Aes256};

use super::cbc_mode::{check_mode_and_iv, decrypt_cbc};
use super::CipherBackend;
use crate::error::SpadeError;
use crate::model::{Algorithm, Mode};

const AES_BLOCK: usize = 16;

/// AES-128/192/256, selected by key length.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesBackend;

impl CipherBackend for AesBackend {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Aes
    }

    fn block_size(&self) -> usize {
        AES_BLOCK
    }

    fn accepts_key_bits(&self, key_bits: u32) -> bool {
        matches!(key_bits, 128 | 192 | 256)
    }

    fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        iv: &[u8],
        mode: Mode,
    ) -> Result<Vec<u8>, SpadeError> {
        check_mode_and_iv(Algorithm::Aes, mode, iv)?;
        match key.len() {
            16 => decrypt_cbc::<Aes128>(AES_BLOCK, ciphertext, key, iv),
            24 => decrypt_cbc::<Aes192>(AES_BLOCK, ciphertext, key, iv),
            32 => decrypt_cbc::<Aes256>(AES_BLOCK, ciphertext, key, iv),
            other => Err(SpadeError::InvalidKeyLength {
                algorithm: Algorithm::Aes,
                bits: (other * 8) as u32,
            }),
        }
    }
}
