//! # Error Types
//!
//! Every fallible operation in the crate returns [`Result<T, SpadeError>`](SpadeError).
//! A failed attack carries the terminal variant in
//! [`AttackResult::error`](crate::AttackResult::error) rather than returning `Err`,
//! so callers can always inspect attempts and elapsed time.

use std::fmt;

use thiserror::Error;

use crate::model::{Algorithm, Mode};

/// The error type for all recovery and analysis operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpadeError {
    /// No cipher backend is registered for the requested algorithm.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(Algorithm),

    /// The algorithm is implemented but not in the requested mode.
    #[error("Unsupported mode {mode} for {algorithm}")]
    UnsupportedMode { algorithm: Algorithm, mode: Mode },

    /// A single candidate key failed to decode.
    ///
    /// Raised by [`CipherBackend::decrypt`](crate::cipher::CipherBackend::decrypt)
    /// and always treated as "wrong key" by the engine; it never reaches an
    /// [`AttackResult`](crate::AttackResult).
    #[error("Decryption failed: {0}")]
    DecryptionFailure(String),

    /// The IV prefix is missing or shorter than required.
    #[error("Invalid IV: expected {expected} bytes, got {actual}")]
    InvalidIv { expected: usize, actual: usize },

    /// The key length is not accepted by the cipher.
    #[error("Invalid key length for {algorithm}: {bits} bits")]
    InvalidKeyLength { algorithm: Algorithm, bits: u32 },

    /// Every candidate was tried without a valid plaintext.
    #[error("search space exhausted after {attempts} attempts{}", capped_suffix(.capped))]
    ExhaustedSearchSpace {
        attempts: u64,
        capped: Option<SearchCap>,
    },

    /// An external stop request was observed.
    #[error("Cancelled after {attempts} attempts")]
    Cancelled { attempts: u64 },

    /// The selected compute backend could not be initialised.
    #[error("Compute backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The request is structurally invalid (empty mask, zero-length index space, ...).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Key derivation failed (bad parameters or output length).
    #[error("Key derivation failed: {0}")]
    Kdf(String),

    /// `run_attack` was called while another attack was running on the same engine.
    #[error("An attack is already running on this engine")]
    AttackInProgress,
}

impl From<&'static str> for SpadeError {
    fn from(msg: &'static str) -> Self {
        SpadeError::InvalidRequest(msg.to_string())
    }
}

/// Records that a brute-force search was truncated by the keyspace cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchCap {
    /// Bits actually enumerated (`2^cap_bits` keys).
    pub cap_bits: u32,
    /// Key size the caller asked for.
    pub requested_bits: u32,
}

impl fmt::Display for SearchCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "search space capped at 2^{} keys; requested {}-bit keyspace was not fully searched",
            self.cap_bits, self.requested_bits
        )
    }
}

fn capped_suffix(capped: &Option<SearchCap>) -> String {
    match capped {
        Some(cap) => format!(" ({cap})"),
        None => String::new(),
    }
}

impl SpadeError {
    /// `true` for the per-key failures the engine swallows.
    #[must_use]
    pub const fn is_wrong_key(&self) -> bool {
        matches!(self, SpadeError::DecryptionFailure(_))
    }
}
