//! src/cipher/des.rs
//! Single DES and two/three-key Triple DES.

use des::{Des, TdesEde2, TdesEde3};

use super::cbc_mode::{check_mode_and_iv, decrypt_cbc};
use super::CipherBackend;
use crate::error::SpadeError;
use crate::model::{Algorithm, Mode};

const DES_BLOCK: usize = 8;

/// DES with a 64-bit key (parity bits ignored).
#[derive(Debug, Clone, Copy, Default)]
pub struct DesBackend;

impl CipherBackend for DesBackend {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Des
    }

    fn block_size(&self) -> usize {
        DES_BLOCK
    }

    fn accepts_key_bits(&self, key_bits: u32) -> bool {
        key_bits == 64
    }

    fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        iv: &[u8],
        mode: Mode,
    ) -> Result<Vec<u8>, SpadeError> {
        check_mode_and_iv(Algorithm::Des, mode, iv)?;
        decrypt_cbc::<Des>(DES_BLOCK, ciphertext, key, iv)
    }
}

/// 3DES-EDE with a 128-bit (two-key) or 192-bit (three-key) key.
#[derive(Debug, Clone, Copy, Default)]
pub struct TripleDesBackend;

impl CipherBackend for TripleDesBackend {
    fn algorithm(&self) -> Algorithm {
        Algorithm::TripleDes
    }

    fn block_size(&self) -> usize {
        DES_BLOCK
    }

    fn accepts_key_bits(&self, key_bits: u32) -> bool {
        matches!(key_bits, 128 | 192)
    }

    fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        iv: &[u8],
        mode: Mode,
    ) -> Result<Vec<u8>, SpadeError> {
        check_mode_and_iv(Algorithm::TripleDes, mode, iv)?;
        match key.len() {
            16 => decrypt_cbc::<TdesEde2>(DES_BLOCK, ciphertext, key, iv),
            24 => decrypt_cbc::<TdesEde3>(DES_BLOCK, ciphertext, key, iv),
            other => Err(SpadeError::InvalidKeyLength {
                algorithm: Algorithm::TripleDes,
                bits: (other * 8) as u32,
            }),
        }
    }
}
