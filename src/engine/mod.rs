//! # Keyspace Attack Engine
//!
//! [`KeyspaceAttackEngine::run_attack`] validates a request, builds the
//! candidate space for its method, splits it across the configured compute
//! backend and folds the worker reports into one [`AttackResult`].
//!
//! The engine is `Sync`: [`request_stop`](KeyspaceAttackEngine::request_stop)
//! may be called from any thread while `run_attack` blocks on another. Only one
//! attack runs per engine at a time.

pub mod config;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::cipher::{split_iv, CipherRegistry};
use crate::compute::{
    AcceleratorBackend, ComputeBackend, ComputeSelection, CpuBackend, FoundSlot, PartitionJob,
    PartitionReport,
};
use crate::error::{SearchCap, SpadeError};
use crate::kdf::KeyDerivation;
use crate::keyspace::{partition, KeySource, KeyspacePartition};
use crate::model::{AttackMethod, AttackRequest, AttackResult};
use crate::progress::{ProgressReporter, ProgressSink};
use crate::validator::{PlaintextValidator, PrintableRatioValidator};

pub use self::config::EngineConfig;

/// Brute-force and dictionary search engine.
pub struct KeyspaceAttackEngine {
    config: EngineConfig,
    registry: CipherRegistry,
    validator: Arc<dyn PlaintextValidator>,
    progress: ProgressReporter,
    cancel: CancellationToken,
    running: AtomicBool,
}

/// Clears the running flag when an attack ends, however it ends.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl KeyspaceAttackEngine {
    /// Engine with the default cipher registry and printable-ratio validator.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            registry: CipherRegistry::with_defaults(),
            validator: Arc::new(PrintableRatioValidator::new()),
            progress: ProgressReporter::default(),
            cancel: CancellationToken::new(),
            running: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: CipherRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: impl PlaintextValidator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    #[must_use]
    pub fn with_progress_sink(mut self, sink: impl ProgressSink + 'static) -> Self {
        self.progress = ProgressReporter::new(Some(Arc::new(sink)));
        self
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &CipherRegistry {
        &self.registry
    }

    /// Detached handle to this engine's stop flag.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Ask the running attack to stop. Idempotent; returns immediately.
    pub fn request_stop(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Run `request` to completion, cancellation or exhaustion.
    ///
    /// Never panics on bad input: every failure is reported through
    /// [`AttackResult::error`].
    pub fn run_attack(&self, request: &AttackRequest) -> AttackResult {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return AttackResult::failure(SpadeError::AttackInProgress);
        }
        let _guard = RunningGuard(&self.running);

        self.cancel.reset();
        let started = Instant::now();

        let mut result = self
            .execute(request)
            .unwrap_or_else(AttackResult::failure);
        result.elapsed = started.elapsed();

        info!(
            algorithm = %request.algorithm,
            method = request.method.label(),
            success = result.success,
            attempts = result.attempts,
            elapsed_ms = result.elapsed.as_millis() as u64,
            backend = %result.backend,
            "attack finished"
        );
        result
    }

    fn execute(&self, request: &AttackRequest) -> Result<AttackResult, SpadeError> {
        let cipher = self.registry.get(request.algorithm)?;
        if !cipher.supports_mode(request.mode) {
            return Err(SpadeError::UnsupportedMode {
                algorithm: request.algorithm,
                mode: request.mode,
            });
        }
        if !cipher.accepts_key_bits(request.key_size_bits) {
            return Err(SpadeError::InvalidKeyLength {
                algorithm: request.algorithm,
                bits: request.key_size_bits,
            });
        }
        let (iv, body) = split_iv(&request.ciphertext)?;

        let cap_bits = self.config.keyspace_cap_bits();
        let source = KeySource::for_request(request, cap_bits)?;
        let key_len = (request.key_size_bits / 8) as usize;

        let raw_keys = KeyDerivation::default();
        let kdf = match &request.method {
            AttackMethod::BruteForce => &raw_keys,
            AttackMethod::Dictionary { kdf, .. }
            | AttackMethod::RuleBased { kdf, .. }
            | AttackMethod::Mask { kdf, .. }
            | AttackMethod::SmartBruteForce { kdf, .. }
            | AttackMethod::Hybrid { kdf, .. }
            | AttackMethod::RainbowTable { kdf, .. } => {
                // Bad KDF parameters would otherwise fail every candidate silently.
                kdf.derive("", key_len)?;
                kdf
            }
        };

        let partitions = partition(source.len(), request.profile.thread_count());
        info!(
            algorithm = %request.algorithm,
            mode = %request.mode,
            key_bits = request.key_size_bits,
            method = request.method.label(),
            candidates = source.len(),
            workers = partitions.len(),
            "starting attack"
        );
        debug!(?partitions, "keyspace layout");

        let found = FoundSlot::default();
        let job = PartitionJob {
            cipher: cipher.as_ref(),
            validator: self.validator.as_ref(),
            source: &source,
            kdf,
            key_len,
            iv,
            body,
            mode: request.mode,
            label: request.method.label(),
            progress: &self.progress,
            progress_interval: self.config.progress_interval(),
            found: &found,
        };

        let (backend, reports) = self.dispatch(&partitions, &job)?;
        let totals = WorkerTotals::fold(&reports);
        let attempts = totals.attempts;
        info!(
            backend = %backend,
            attempts,
            throughput = totals.throughput,
            winner = ?totals.winner,
            "workers joined"
        );

        let mut result = match found.into_hit() {
            Some(hit) => AttackResult::success(hit.key, hit.plaintext),
            None if self.cancel.is_cancelled() => {
                AttackResult::failure(SpadeError::Cancelled { attempts })
            }
            None => {
                let capped = (matches!(request.method, AttackMethod::BruteForce)
                    && request.key_size_bits > cap_bits)
                    .then_some(SearchCap {
                        cap_bits,
                        requested_bits: request.key_size_bits,
                    });
                AttackResult::failure(SpadeError::ExhaustedSearchSpace { attempts, capped })
            }
        };
        result.attempts = attempts;
        result.backend = backend;
        Ok(result)
    }

    /// Run the job on the configured backend, falling back to the CPU when an
    /// accelerator is unavailable and fallback is enabled.
    fn dispatch(
        &self,
        partitions: &[KeyspacePartition],
        job: &PartitionJob<'_>,
    ) -> Result<(String, Vec<PartitionReport>), SpadeError> {
        let cpu = CpuBackend::new();
        let platform = match self.config.compute() {
            ComputeSelection::Cpu => {
                debug!(backend = cpu.name(), "compute backend selected");
                let reports = cpu.run_partitions(partitions, job, &self.cancel)?;
                return Ok((cpu.name().to_string(), reports));
            }
            ComputeSelection::Accelerator(platform) => platform,
        };

        let mut accelerator = AcceleratorBackend::new();
        let outcome = if accelerator.select(platform) {
            debug!(backend = accelerator.name(), %platform, "compute backend selected");
            accelerator.run_partitions(partitions, job, &self.cancel)
        } else {
            Err(SpadeError::BackendUnavailable(format!(
                "no {platform} accelerator device found"
            )))
        };

        match outcome {
            Ok(reports) => Ok((accelerator.name().to_string(), reports)),
            Err(err @ SpadeError::BackendUnavailable(_)) if self.config.fallback_to_cpu() => {
                warn!(error = %err, "accelerator unavailable, falling back to CPU");
                let reports = cpu.run_partitions(partitions, job, &self.cancel)?;
                Ok((cpu.name().to_string(), reports))
            }
            Err(err) => Err(err),
        }
    }
}

/// Per-attack totals over every worker's report.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WorkerTotals {
    attempts: u64,
    /// Combined attempts per second; workers run concurrently, so rates add.
    throughput: f64,
    /// Partition index of the worker whose candidate was accepted.
    winner: Option<usize>,
}

impl WorkerTotals {
    fn fold(reports: &[PartitionReport]) -> Self {
        Self {
            attempts: reports.iter().map(|report| report.attempts).sum(),
            throughput: reports.iter().map(|report| report.throughput).sum(),
            winner: reports.iter().position(|report| report.won),
        }
    }
}

impl Default for KeyspaceAttackEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for KeyspaceAttackEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyspaceAttackEngine")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("running", &self.is_running())
            .field("stop_requested", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn totals_sum_attempts_and_rates() {
        let reports = [
            PartitionReport::new(100, false, Duration::from_secs(1)),
            PartitionReport::new(50, true, Duration::from_millis(500)),
            PartitionReport::new(0, false, Duration::ZERO),
        ];
        let totals = WorkerTotals::fold(&reports);
        assert_eq!(totals.attempts, 150);
        assert!((totals.throughput - 200.0).abs() < 1e-9);
        assert_eq!(totals.winner, Some(1));
    }

    #[test]
    fn no_winner_when_exhausted() {
        let reports = [PartitionReport::new(10, false, Duration::from_secs(1))];
        assert_eq!(WorkerTotals::fold(&reports).winner, None);
        assert_eq!(WorkerTotals::fold(&[]).attempts, 0);
    }
}
