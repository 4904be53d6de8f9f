//! src/kdf/digest.rs

use sha2::{Digest, Sha256};

/// Salted SHA-256 key derivation written directly into `out_key`.
///
/// The first 32 bytes are `SHA-256(password ‖ salt)`. Keys longer than one
/// digest (Blowfish-448) continue with `SHA-256(previous digest)` per block.
#[inline]
pub fn derive_sha256_key(password: &str, salt: &[u8], out_key: &mut [u8]) {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt);
    let mut block: [u8; 32] = hasher.finalize_reset().into();

    for chunk in out_key.chunks_mut(32) {
        chunk.copy_from_slice(&block[..chunk.len()]);
        hasher.update(block);
        block = hasher.finalize_reset().into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_block_is_plain_salted_digest() {
        let mut key = [0u8; 32];
        derive_sha256_key("password", b"", &mut key);
        let expected: [u8; 32] = Sha256::digest(b"password").into();
        assert_eq!(key, expected);
    }

    #[test]
    fn short_keys_are_prefixes_of_long_keys() {
        let mut short = [0u8; 8];
        let mut long = [0u8; 56];
        derive_sha256_key("hunter2", b"salt", &mut short);
        derive_sha256_key("hunter2", b"salt", &mut long);
        assert_eq!(&long[..8], &short[..]);
        assert_ne!(&long[32..40], &long[..8]);
    }
}
