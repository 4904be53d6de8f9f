//! src/cipher/cbc_mode.rs
//! Shared CBC/PKCS#7 decryption for every block-cipher backend.

use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockCipher, BlockDecryptMut, KeyInit, KeyIvInit};

use crate::consts::IV_PREFIX_LEN;
use crate::error::SpadeError;
use crate::model::{Algorithm, Mode};

/// Mode and IV checks every backend performs before touching the key.
#[inline(always)]
pub(crate) fn check_mode_and_iv(
    algorithm: Algorithm,
    mode: Mode,
    iv: &[u8],
) -> Result<(), SpadeError> {
    if mode != Mode::Cbc {
        return Err(SpadeError::UnsupportedMode { algorithm, mode });
    }
    if iv.len() < IV_PREFIX_LEN {
        return Err(SpadeError::InvalidIv {
            expected: IV_PREFIX_LEN,
            actual: iv.len(),
        });
    }
    Ok(())
}

/// CBC-decrypt and strip PKCS#7 padding.
///
/// `iv` is truncated to the cipher's block size. A key of the wrong length,
/// misaligned input or invalid padding all map to
/// [`SpadeError::DecryptionFailure`]; the engine treats them as a wrong key.
#[inline(always)]
pub(crate) fn decrypt_cbc<C>(
    block_size: usize,
    ciphertext: &[u8],
    key: &[u8],
    iv: &[u8],
) -> Result<Vec<u8>, SpadeError>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    if ciphertext.is_empty() || ciphertext.len() % block_size != 0 {
        return Err(SpadeError::DecryptionFailure(format!(
            "ciphertext length {} is not a positive multiple of {block_size}",
            ciphertext.len()
        )));
    }

    let decryptor = cbc::Decryptor::<C>::new_from_slices(key, &iv[..block_size])
        .map_err(|_| SpadeError::DecryptionFailure(format!("rejected {}-byte key", key.len())))?;

    decryptor
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| SpadeError::DecryptionFailure("invalid padding".into()))
}
