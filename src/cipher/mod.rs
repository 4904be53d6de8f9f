//! # Cipher Backends
//!
//! One [`CipherBackend`] per cipher family, looked up through a
//! [`CipherRegistry`] so new algorithms attach without touching the engine.
//!
//! Every backend decrypts the CBC-equivalent, IV-prefixed layout: the first
//! [`IV_PREFIX_LEN`] bytes of the file are the IV (8-byte-block ciphers use the
//! first 8) and the remainder is PKCS#7-padded ciphertext. Any other [`Mode`]
//! fails with [`SpadeError::UnsupportedMode`].

pub mod aes;
pub mod blowfish;
pub mod des;
pub(crate) mod cbc_mode;

use std::collections::HashMap;
use std::sync::Arc;

use crate::consts::IV_PREFIX_LEN;
use crate::error::SpadeError;
use crate::model::{Algorithm, Mode};

pub use self::aes::AesBackend;
pub use self::blowfish::BlowfishBackend;
pub use self::des::{DesBackend, TripleDesBackend};

/// Per-algorithm decryption primitive.
///
/// Implementations hold no per-call state and are invoked concurrently from
/// every worker thread.
pub trait CipherBackend: Send + Sync {
    /// The algorithm this backend implements.
    fn algorithm(&self) -> Algorithm;

    /// Block size in bytes.
    fn block_size(&self) -> usize;

    /// `true` when `key_bits` is a key length this cipher accepts.
    fn accepts_key_bits(&self, key_bits: u32) -> bool;

    /// `true` when `mode` is implemented. Only CBC is.
    fn supports_mode(&self, mode: Mode) -> bool {
        mode == Mode::Cbc
    }

    /// Decrypt `ciphertext` (IV already stripped) under `key` and `iv`.
    ///
    /// Returns [`SpadeError::DecryptionFailure`] when the candidate key does
    /// not decode (bad padding, misaligned input), [`SpadeError::InvalidIv`]
    /// when `iv` is shorter than [`IV_PREFIX_LEN`] and
    /// [`SpadeError::UnsupportedMode`] for anything but CBC.
    fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        iv: &[u8],
        mode: Mode,
    ) -> Result<Vec<u8>, SpadeError>;
}

/// Splits an IV-prefixed buffer into `(iv, body)`.
pub fn split_iv(data: &[u8]) -> Result<(&[u8], &[u8]), SpadeError> {
    if data.len() < IV_PREFIX_LEN {
        return Err(SpadeError::InvalidIv {
            expected: IV_PREFIX_LEN,
            actual: data.len(),
        });
    }
    Ok(data.split_at(IV_PREFIX_LEN))
}

/// Strategy table mapping an [`Algorithm`] to its backend.
#[derive(Clone)]
pub struct CipherRegistry {
    backends: HashMap<Algorithm, Arc<dyn CipherBackend>>,
}

impl CipherRegistry {
    /// Empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    /// Registry with AES, DES, 3DES and Blowfish.
    ///
    /// Twofish, RC4 and ChaCha20 are recognised tags but have no backend and
    /// resolve to [`SpadeError::UnsupportedAlgorithm`].
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(AesBackend));
        registry.register(Arc::new(DesBackend));
        registry.register(Arc::new(TripleDesBackend));
        registry.register(Arc::new(BlowfishBackend));
        registry
    }

    /// Add or replace the backend for `backend.algorithm()`.
    pub fn register(&mut self, backend: Arc<dyn CipherBackend>) {
        self.backends.insert(backend.algorithm(), backend);
    }

    /// Backend for `algorithm`.
    pub fn get(&self, algorithm: Algorithm) -> Result<Arc<dyn CipherBackend>, SpadeError> {
        self.backends
            .get(&algorithm)
            .cloned()
            .ok_or(SpadeError::UnsupportedAlgorithm(algorithm))
    }

    /// Registered algorithms, in a stable order.
    #[must_use]
    pub fn algorithms(&self) -> Vec<Algorithm> {
        let mut algorithms: Vec<_> = self.backends.keys().copied().collect();
        algorithms.sort_by_key(ToString::to_string);
        algorithms
    }
}

impl Default for CipherRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for CipherRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherRegistry")
            .field("algorithms", &self.algorithms())
            .finish()
    }
}
