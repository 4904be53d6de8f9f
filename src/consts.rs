//! # Constants
//!
//! Search limits, heuristic thresholds, recognised signatures and key-derivation
//! defaults used throughout the library.

/// Largest keyspace exponent the brute-force engine will enumerate.
///
/// Any requested key size above this is searched only over its low
/// `2^MAX_KEYSPACE_BITS` values; exhaustion is then reported with a
/// [`SearchCap`](crate::error::SearchCap).
pub const MAX_KEYSPACE_BITS: u32 = 32;

/// Length of the IV prefix expected at the head of every ciphertext.
pub const IV_PREFIX_LEN: usize = 16;

/// Default number of attempts between two progress events of one worker.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000;

/// Worker count used by [`PerformanceProfile::Normal`](crate::PerformanceProfile::Normal).
pub const NORMAL_PROFILE_THREADS: usize = 3;

// ─────────────────────────────────────────────────────────────────────────────
// Plaintext validator
// ─────────────────────────────────────────────────────────────────────────────

/// Printable ratio a buffer must strictly exceed to be accepted.
pub const MIN_PRINTABLE_RATIO: f64 = 0.7;

/// Null-byte ratio a buffer must stay strictly below to be accepted.
pub const MAX_NULL_RATIO: f64 = 0.1;

// ─────────────────────────────────────────────────────────────────────────────
// Analyzer thresholds and weights
// ─────────────────────────────────────────────────────────────────────────────

pub const HIGH_ENTROPY_THRESHOLD: f64 = 7.5;
pub const DEFAULT_GUESS_ENTROPY_THRESHOLD: f64 = 7.0;
pub const IV_BLOCK_ENTROPY_THRESHOLD: f64 = 7.0;
pub const ECB_DISTINCT_RATIO: f64 = 0.9;
pub const CHI_SQUARED_RANGE: (f64, f64) = (200.0, 400.0);
pub const IOC_THRESHOLD: f64 = 0.05;

pub const ENVELOPE_WEIGHT: f64 = 0.4;
pub const ENTROPY_WEIGHT: f64 = 0.3;
pub const MODE_WEIGHT: f64 = 0.2;
pub const KEY_SIZE_WEIGHT: f64 = 0.1;
pub const CHI_SQUARED_WEIGHT: f64 = 0.1;
pub const IOC_WEIGHT: f64 = 0.1;
pub const DEFAULT_GUESS_CONFIDENCE: f64 = 0.3;

/// Buffers shorter than this are never matched against signatures.
pub const MIN_SIGNATURE_LEN: usize = 16;

// ─────────────────────────────────────────────────────────────────────────────
// Signatures (recognised, never produced)
// ─────────────────────────────────────────────────────────────────────────────

pub const SALTED_PREFIX: &[u8; 8] = b"Salted__";
pub const DER_SEQUENCE_TAG: u8 = 0x30;
pub const PGP_HEADER_MASK: u8 = 0xC0;

pub const ZIP_MAGIC: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
pub const PDF_MAGIC: &[u8] = &[0x25, 0x50, 0x44, 0x46];
pub const RAR_MAGIC: &[u8] = &[0x52, 0x61, 0x72, 0x21];
pub const SEVEN_ZIP_MAGIC: &[u8] = &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C];

// ─────────────────────────────────────────────────────────────────────────────
// Password generation
// ─────────────────────────────────────────────────────────────────────────────

/// Alphabet for smart brute force when the caller supplies none.
pub const DEFAULT_CHARSET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_MAX_PASSWORD_LENGTH: u32 = 8;

/// Longest password smart brute force will generate.
pub const MAX_PASSWORD_LENGTH: u32 = 20;

/// Tried ahead of the charset space by smart brute force and hybrid attacks.
pub const COMMON_PASSWORDS: &[&str] = &[
    "password", "123456", "qwerty", "admin", "letmein", "welcome", "monkey", "dragon",
];

// ─────────────────────────────────────────────────────────────────────────────
// Key derivation defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Salt used by PBKDF2 and scrypt when the caller supplies none.
pub const DEFAULT_KDF_SALT: &[u8] = b"SpadeAce";

/// PBKDF2-HMAC-SHA256 iteration count used when the caller supplies none.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 10_000;

/// scrypt cost parameters (N = 2^14, r = 8, p = 1).
pub const DEFAULT_SCRYPT_LOG_N: u8 = 14;
pub const DEFAULT_SCRYPT_R: u32 = 8;
pub const DEFAULT_SCRYPT_P: u32 = 1;

/// Argon2id costs (19 MiB, 2 passes, 1 lane).
pub const DEFAULT_ARGON2_M_COST: u32 = 19_456;
pub const DEFAULT_ARGON2_T_COST: u32 = 2;
pub const DEFAULT_ARGON2_P_COST: u32 = 1;

/// Working memory a single scrypt or Argon2 derivation may claim (1 GiB).
///
/// Every worker derives concurrently, so costs above this are refused with
/// [`SpadeError::Kdf`](crate::error::SpadeError::Kdf) instead of being
/// allocated.
pub const MAX_KDF_MEMORY: u64 = 1 << 30;
