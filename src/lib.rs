// src/lib.rs

pub mod analyzer;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod cancel;
pub mod cipher;
pub mod compute;
pub mod consts;
pub mod engine;
pub mod error;
pub mod kdf;
pub mod keyspace;
pub mod model;
pub mod progress;
pub mod validator;

// High-level API
pub use analyzer::{AlgorithmGuess, AnalysisResult, FileFingerprintAnalyzer};
pub use engine::{EngineConfig, KeyspaceAttackEngine};
pub use error::{SearchCap, SpadeError};
pub use model::{
    Algorithm, AttackMethod, AttackRequest, AttackResult, KeyDescriptor, Mode,
    PerformanceProfile,
};

// Extension points
pub use cancel::CancellationToken;
pub use cipher::{CipherBackend, CipherRegistry};
pub use compute::{
    AcceleratorBackend, ComputeBackend, ComputeSelection, CpuBackend, DeviceDescriptor,
    PartitionJob, PartitionReport, Platform,
};
pub use progress::{ProgressEvent, ProgressSink};
pub use validator::{PlaintextValidator, PrintableRatioValidator};

// Key derivation and keyspace helpers
pub use kdf::{
    derive_argon2_key, derive_pbkdf2_key, derive_scrypt_key, derive_sha256_key, KeyDerivation,
};
pub use keyspace::{key_from_counter, partition, KeyspacePartition};

#[cfg(feature = "batch-ops")]
pub use batch_ops::analyze_batch;
