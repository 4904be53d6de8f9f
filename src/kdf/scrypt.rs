//! src/kdf/scrypt.rs

use scrypt::{scrypt, Params};
use zeroize::Zeroizing;

use crate::consts::MAX_KDF_MEMORY;
use crate::error::SpadeError;

/// scrypt refuses outputs shorter than this, so DES-sized keys are cut from a
/// longer derivation.
const SCRYPT_MIN_OUTPUT: usize = 10;

/// Bytes scrypt allocates for `N = 2^log_n`: `128·r·N` for the ROMix table
/// plus `128·r·p` for the block buffer. `None` on overflow.
fn scrypt_memory(log_n: u8, r: u32, p: u32) -> Option<u64> {
    let n = 1u64.checked_shl(u32::from(log_n))?;
    let table = 128u64.checked_mul(u64::from(r))?.checked_mul(n)?;
    let blocks = 128u64
        .checked_mul(u64::from(r))?
        .checked_mul(u64::from(p))?;
    table.checked_add(blocks)
}

/// Derive an scrypt key directly into `out_key`.
///
/// Parameters whose working set exceeds [`MAX_KDF_MEMORY`] are rejected
/// before anything is allocated.
pub fn derive_scrypt_key(
    password: &str,
    salt: &[u8],
    log_n: u8,
    r: u32,
    p: u32,
    out_key: &mut [u8],
) -> Result<(), SpadeError> {
    match scrypt_memory(log_n, r, p) {
        Some(bytes) if bytes <= MAX_KDF_MEMORY => {}
        _ => {
            return Err(SpadeError::Kdf(format!(
                "scrypt parameters (log_n={log_n}, r={r}, p={p}) exceed the {MAX_KDF_MEMORY}-byte memory limit"
            )))
        }
    }

    let len = out_key.len().max(SCRYPT_MIN_OUTPUT);
    let params = Params::new(log_n, r, p, len)
        .map_err(|e| SpadeError::Kdf(format!("invalid scrypt parameters: {e}")))?;

    let mut buf = Zeroizing::new(vec![0u8; len]);
    scrypt(password.as_bytes(), salt, &params, &mut buf)
        .map_err(|e| SpadeError::Kdf(format!("scrypt failed: {e}")))?;

    out_key.copy_from_slice(&buf[..out_key.len()]);
    Ok(())
}
