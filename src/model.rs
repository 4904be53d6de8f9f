//! # Request / Result Model
//!
//! Tags naming the cipher, mode and attack, the [`AttackRequest`] a caller
//! submits, and the [`AttackResult`] the engine returns.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::consts::NORMAL_PROFILE_THREADS;
use crate::error::SpadeError;
use crate::kdf::KeyDerivation;

/// Cipher family tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algorithm {
    Aes,
    Des,
    TripleDes,
    Blowfish,
    Twofish,
    Rc4,
    ChaCha20,
    Unknown,
}

impl Algorithm {
    /// Cipher block size in bytes, `None` for stream ciphers and `Unknown`.
    #[must_use]
    pub const fn block_size(self) -> Option<usize> {
        match self {
            Algorithm::Aes | Algorithm::Twofish => Some(16),
            Algorithm::Des | Algorithm::TripleDes | Algorithm::Blowfish => Some(8),
            Algorithm::Rc4 | Algorithm::ChaCha20 | Algorithm::Unknown => None,
        }
    }

    /// Conventional key size reported by the fingerprint analyzer.
    #[must_use]
    pub const fn default_key_bits(self) -> Option<u32> {
        match self {
            Algorithm::Aes => Some(256),
            Algorithm::Des => Some(64),
            Algorithm::TripleDes => Some(192),
            Algorithm::Blowfish => Some(448),
            Algorithm::Twofish => Some(256),
            Algorithm::Rc4 => Some(128),
            Algorithm::ChaCha20 => Some(256),
            Algorithm::Unknown => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::Aes => "AES",
            Algorithm::Des => "DES",
            Algorithm::TripleDes => "3DES",
            Algorithm::Blowfish => "Blowfish",
            Algorithm::Twofish => "Twofish",
            Algorithm::Rc4 => "RC4",
            Algorithm::ChaCha20 => "ChaCha20",
            Algorithm::Unknown => "Unknown",
        })
    }
}

impl FromStr for Algorithm {
    type Err = SpadeError;

    /// Parses a case-insensitive tag. Unrecognised names map to
    /// [`Algorithm::Unknown`] so that dispatch can report them as unsupported.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "aes" => Algorithm::Aes,
            "des" => Algorithm::Des,
            "3des" | "tripledes" | "triple_des" | "des-ede3" => Algorithm::TripleDes,
            "blowfish" => Algorithm::Blowfish,
            "twofish" => Algorithm::Twofish,
            "rc4" | "arc4" => Algorithm::Rc4,
            "chacha20" => Algorithm::ChaCha20,
            _ => Algorithm::Unknown,
        })
    }
}

/// Block cipher mode tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    Ecb,
    Cbc,
    Cfb,
    Ofb,
    Ctr,
    Gcm,
    Unknown,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Ecb => "ECB",
            Mode::Cbc => "CBC",
            Mode::Cfb => "CFB",
            Mode::Ofb => "OFB",
            Mode::Ctr => "CTR",
            Mode::Gcm => "GCM",
            Mode::Unknown => "Unknown",
        })
    }
}

/// How many workers an attack may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PerformanceProfile {
    /// Single worker.
    Efficiency,
    /// Three workers.
    #[default]
    Normal,
    /// One worker per hardware core.
    Performance,
}

impl PerformanceProfile {
    /// Worker count for this profile (always ≥ 1).
    #[must_use]
    pub fn thread_count(self) -> usize {
        match self {
            PerformanceProfile::Efficiency => 1,
            PerformanceProfile::Normal => NORMAL_PROFILE_THREADS,
            PerformanceProfile::Performance => num_cpus::get().max(1),
        }
    }
}

/// Search strategy and the candidate material it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum AttackMethod {
    /// Enumerate raw key values `0..2^min(key_size_bits, cap)`.
    BruteForce,
    /// Try each word in order.
    Dictionary {
        words: Vec<String>,
        kdf: KeyDerivation,
    },
    /// Try every word under every mangling rule.
    RuleBased {
        words: Vec<String>,
        rules: Vec<String>,
        kdf: KeyDerivation,
    },
    /// Enumerate every password matching a `?l?u?d?s?a` mask.
    Mask { pattern: String, kdf: KeyDerivation },
    /// Common passwords (when `common_first`), then every `charset` string of
    /// length `1..=max_length`, shortest first.
    SmartBruteForce {
        charset: String,
        max_length: u32,
        common_first: bool,
        kdf: KeyDerivation,
    },
    /// The dictionary, then smart brute force with common passwords first.
    Hybrid {
        words: Vec<String>,
        charset: String,
        max_length: u32,
        kdf: KeyDerivation,
    },
    /// Precomputed `hash:password` entries; the second field is the candidate.
    /// Entries without a `:` are counted but never tried.
    RainbowTable {
        entries: Vec<String>,
        kdf: KeyDerivation,
    },
}

impl AttackMethod {
    /// Dictionary attack with the default (SHA-256) key derivation.
    #[must_use]
    pub fn dictionary<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AttackMethod::Dictionary {
            words: words.into_iter().map(Into::into).collect(),
            kdf: KeyDerivation::default(),
        }
    }

    /// Smart brute force over `charset` up to `max_length`, common passwords
    /// first, with the default (SHA-256) key derivation.
    #[must_use]
    pub fn smart_brute_force(charset: impl Into<String>, max_length: u32) -> Self {
        AttackMethod::SmartBruteForce {
            charset: charset.into(),
            max_length,
            common_first: true,
            kdf: KeyDerivation::default(),
        }
    }

    /// Short label used in logs and status text.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            AttackMethod::BruteForce => "brute force",
            AttackMethod::Dictionary { .. } => "dictionary",
            AttackMethod::RuleBased { .. } => "rule-based",
            AttackMethod::Mask { .. } => "mask",
            AttackMethod::SmartBruteForce { .. } => "smart brute force",
            AttackMethod::Hybrid { .. } => "hybrid",
            AttackMethod::RainbowTable { .. } => "rainbow table",
        }
    }
}

/// A single recovery job. Immutable once handed to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackRequest {
    pub ciphertext: Vec<u8>,
    pub algorithm: Algorithm,
    pub mode: Mode,
    pub key_size_bits: u32,
    pub method: AttackMethod,
    pub profile: PerformanceProfile,
}

impl AttackRequest {
    /// Brute-force request with CBC mode, the algorithm's default key size and
    /// the [`PerformanceProfile::Normal`] profile.
    #[must_use]
    pub fn new(ciphertext: impl Into<Vec<u8>>, algorithm: Algorithm) -> Self {
        Self {
            ciphertext: ciphertext.into(),
            algorithm,
            mode: Mode::Cbc,
            key_size_bits: algorithm.default_key_bits().unwrap_or(0),
            method: AttackMethod::BruteForce,
            profile: PerformanceProfile::default(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_key_size(mut self, bits: u32) -> Self {
        self.key_size_bits = bits;
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: AttackMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_profile(mut self, profile: PerformanceProfile) -> Self {
        self.profile = profile;
        self
    }
}

/// What unlocked the ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyDescriptor {
    /// A raw key produced from a brute-force counter.
    RawKey { counter: u64, key_hex: String },
    /// A password fed through the request's key derivation.
    Password(String),
}

impl fmt::Display for KeyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyDescriptor::RawKey { counter, key_hex } => {
                write!(f, "key #{counter} ({key_hex})")
            }
            KeyDescriptor::Password(password) => write!(f, "password {password:?}"),
        }
    }
}

/// Outcome of [`KeyspaceAttackEngine::run_attack`](crate::KeyspaceAttackEngine::run_attack).
///
/// `success` implies a non-empty `plaintext` and a `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackResult {
    pub success: bool,
    pub plaintext: Vec<u8>,
    pub key: Option<KeyDescriptor>,
    pub elapsed: Duration,
    pub attempts: u64,
    pub error: Option<SpadeError>,
    /// Name of the compute backend that actually ran the search.
    pub backend: String,
}

impl AttackResult {
    pub(crate) fn success(key: KeyDescriptor, plaintext: Vec<u8>) -> Self {
        Self {
            success: true,
            plaintext,
            key: Some(key),
            elapsed: Duration::ZERO,
            attempts: 0,
            error: None,
            backend: String::new(),
        }
    }

    pub(crate) fn failure(error: SpadeError) -> Self {
        Self {
            success: false,
            plaintext: Vec::new(),
            key: None,
            elapsed: Duration::ZERO,
            attempts: 0,
            error: Some(error),
            backend: String::new(),
        }
    }

    /// Error message, or an empty string on success.
    #[must_use]
    pub fn error_message(&self) -> String {
        self.error.as_ref().map(ToString::to_string).unwrap_or_default()
    }
}
