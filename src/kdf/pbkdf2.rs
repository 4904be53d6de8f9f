//! src/kdf/pbkdf2.rs

use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha256;

use crate::error::SpadeError;

/// Derive PBKDF2-HMAC-SHA256 directly into `out_key`.
#[inline]
pub fn derive_pbkdf2_key(
    password: &str,
    salt: &[u8],
    iterations: u32,
    out_key: &mut [u8],
) -> Result<(), SpadeError> {
    if iterations == 0 {
        return Err(SpadeError::Kdf("PBKDF2 iterations must be ≥1".into()));
    }

    pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, iterations, out_key)
        .map_err(|e| SpadeError::Kdf(format!("PBKDF2 failed: {e}")))?;
    Ok(())
}
