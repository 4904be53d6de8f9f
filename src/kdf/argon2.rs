//! src/kdf/argon2.rs

use argon2::{Algorithm, Argon2, Params, Version};

use crate::consts::MAX_KDF_MEMORY;
use crate::error::SpadeError;

/// Derive an Argon2id (v0x13) key directly into `out_key`.
///
/// `m_cost` is in KiB. Memory costs above [`MAX_KDF_MEMORY`] are rejected
/// before anything is allocated; the salt must be at least 8 bytes.
pub fn derive_argon2_key(
    password: &str,
    salt: &[u8],
    m_cost: u32,
    t_cost: u32,
    p_cost: u32,
    out_key: &mut [u8],
) -> Result<(), SpadeError> {
    if u64::from(m_cost) * 1024 > MAX_KDF_MEMORY {
        return Err(SpadeError::Kdf(format!(
            "Argon2 memory cost {m_cost} KiB exceeds the {MAX_KDF_MEMORY}-byte memory limit"
        )));
    }

    let params = Params::new(m_cost, t_cost, p_cost, None)
        .map_err(|e| SpadeError::Kdf(format!("invalid Argon2 parameters: {e}")))?;

    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password_into(password.as_bytes(), salt, out_key)
        .map_err(|e| SpadeError::Kdf(format!("Argon2 failed: {e}")))?;
    Ok(())
}
