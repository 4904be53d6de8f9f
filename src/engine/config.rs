//! src/engine/config.rs
//! Engine configuration builder

use crate::compute::ComputeSelection;
use crate::consts::{DEFAULT_PROGRESS_INTERVAL, MAX_KEYSPACE_BITS};

/// Engine-wide settings, fixed for the engine's lifetime.
///
/// Defaults: progress every [`DEFAULT_PROGRESS_INTERVAL`] attempts per worker,
/// a keyspace cap of [`MAX_KEYSPACE_BITS`], CPU execution, and CPU fallback
/// when an accelerator is requested but unavailable.
///
/// # Thread Safety
///
/// Plain data; `Send + Sync`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    progress_interval: u64,
    keyspace_cap_bits: u32,
    compute: ComputeSelection,
    fallback_to_cpu: bool,
}

impl EngineConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            keyspace_cap_bits: MAX_KEYSPACE_BITS,
            compute: ComputeSelection::Cpu,
            fallback_to_cpu: true,
        }
    }

    /// Attempts between progress events of one worker (minimum 1).
    #[must_use]
    pub fn with_progress_interval(mut self, attempts: u64) -> Self {
        self.progress_interval = attempts.max(1);
        self
    }

    /// Lower the brute-force keyspace cap. Values above
    /// [`MAX_KEYSPACE_BITS`] are clamped to it.
    #[must_use]
    pub fn with_keyspace_cap_bits(mut self, bits: u32) -> Self {
        self.keyspace_cap_bits = bits.min(MAX_KEYSPACE_BITS);
        self
    }

    #[must_use]
    pub fn with_compute(mut self, compute: ComputeSelection) -> Self {
        self.compute = compute;
        self
    }

    /// Whether an unavailable accelerator falls back to the CPU backend.
    #[must_use]
    pub fn with_fallback_to_cpu(mut self, fallback: bool) -> Self {
        self.fallback_to_cpu = fallback;
        self
    }

    #[must_use]
    pub const fn progress_interval(&self) -> u64 {
        self.progress_interval
    }

    #[must_use]
    pub const fn keyspace_cap_bits(&self) -> u32 {
        self.keyspace_cap_bits
    }

    #[must_use]
    pub const fn compute(&self) -> ComputeSelection {
        self.compute
    }

    #[must_use]
    pub const fn fallback_to_cpu(&self) -> bool {
        self.fallback_to_cpu
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
