//! # Compute Backends
//!
//! A [`ComputeBackend`] executes one [`PartitionJob`] over a set of keyspace
//! partitions. [`CpuBackend`] runs one scoped OS thread per partition;
//! [`AcceleratorBackend`] is the device-offload contract and reports
//! [`SpadeError::BackendUnavailable`] while no device kernels are linked.
//!
//! Workers share exactly two pieces of mutable state: the cancellation token
//! and the found slot (an atomic flag claimed by compare-and-set plus a
//! write-once result cell). Everything else in a job is read-only.

pub mod accelerator;
pub mod cpu;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cancel::CancellationToken;
use crate::cipher::CipherBackend;
use crate::error::SpadeError;
use crate::kdf::KeyDerivation;
use crate::keyspace::{Candidate, KeySource, KeyspacePartition};
use crate::model::{KeyDescriptor, Mode};
use crate::progress::{ProgressEvent, ProgressReporter};
use crate::validator::PlaintextValidator;

pub use self::accelerator::AcceleratorBackend;
pub use self::cpu::CpuBackend;

/// Device API family an accelerator targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Platform {
    Cuda,
    OpenCl,
    /// First platform with a usable device.
    #[default]
    Auto,
}

impl Platform {
    /// `true` when a device on `other` satisfies a request for `self`.
    #[must_use]
    pub fn matches(self, other: Platform) -> bool {
        self == Platform::Auto || self == other
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::Cuda => "CUDA",
            Platform::OpenCl => "OpenCL",
            Platform::Auto => "auto",
        })
    }
}

/// Which backend an engine runs attacks on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComputeSelection {
    #[default]
    Cpu,
    Accelerator(Platform),
}

/// A compute device reported by [`ComputeBackend::enumerate_devices`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub name: String,
    /// `None` for host CPUs.
    pub platform: Option<Platform>,
    pub compute_units: usize,
}

/// What one worker did with its partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartitionReport {
    pub attempts: u64,
    /// `true` for the single worker whose candidate was accepted.
    pub won: bool,
    /// Attempts per second.
    pub throughput: f64,
    pub elapsed: Duration,
}

impl PartitionReport {
    #[must_use]
    pub fn new(attempts: u64, won: bool, elapsed: Duration) -> Self {
        Self {
            attempts,
            won,
            throughput: throughput(attempts, elapsed),
            elapsed,
        }
    }
}

fn throughput(attempts: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        attempts as f64 / secs
    } else {
        0.0
    }
}

/// The accepted candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Hit {
    pub(crate) key: KeyDescriptor,
    pub(crate) plaintext: Vec<u8>,
}

/// First-writer-wins result slot.
#[derive(Debug, Default)]
pub(crate) struct FoundSlot {
    found: AtomicBool,
    hit: OnceLock<Hit>,
}

impl FoundSlot {
    #[inline]
    pub(crate) fn is_found(&self) -> bool {
        self.found.load(Ordering::Acquire)
    }

    /// Store `hit` if no other worker has; returns `true` for the winner.
    pub(crate) fn claim(&self, hit: Hit) -> bool {
        if self
            .found
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            let _ = self.hit.set(hit);
            true
        } else {
            false
        }
    }

    pub(crate) fn into_hit(self) -> Option<Hit> {
        self.hit.into_inner()
    }
}

/// Everything a worker needs to test candidates for one attack.
///
/// Built by the engine; backends only drive it through
/// [`try_index`](Self::try_index), [`should_stop`](Self::should_stop) and
/// [`report_progress`](Self::report_progress).
pub struct PartitionJob<'a> {
    pub(crate) cipher: &'a dyn CipherBackend,
    pub(crate) validator: &'a dyn PlaintextValidator,
    pub(crate) source: &'a KeySource<'a>,
    pub(crate) kdf: &'a KeyDerivation,
    pub(crate) key_len: usize,
    pub(crate) iv: &'a [u8],
    pub(crate) body: &'a [u8],
    pub(crate) mode: Mode,
    pub(crate) label: &'static str,
    pub(crate) progress: &'a ProgressReporter,
    pub(crate) progress_interval: u64,
    pub(crate) found: &'a FoundSlot,
}

impl PartitionJob<'_> {
    /// Size of the whole index space, across all partitions.
    #[inline]
    #[must_use]
    pub fn total(&self) -> u64 {
        self.source.len()
    }

    #[inline]
    #[must_use]
    pub fn progress_interval(&self) -> u64 {
        self.progress_interval
    }

    /// `true` once any worker has won or a stop was requested.
    #[inline]
    #[must_use]
    pub fn should_stop(&self, cancel: &CancellationToken) -> bool {
        self.found.is_found() || cancel.is_cancelled()
    }

    /// Test the candidate at `index`. Returns `true` only for the worker whose
    /// plaintext was accepted and stored.
    ///
    /// Derivation and decryption errors count as a wrong key.
    pub fn try_index(&self, index: u64) -> bool {
        let Some(candidate) = self.source.candidate(index) else {
            return false;
        };

        let (key, password, counter) = match candidate {
            Candidate::RawKey { counter, key } => (key, None, counter),
            Candidate::Password(password) => {
                match self.kdf.derive(&password, self.key_len) {
                    Ok(key) => (key, Some(password), index),
                    Err(_) => return false,
                }
            }
        };

        let plaintext = match self.cipher.decrypt(self.body, &key, self.iv, self.mode) {
            Ok(plaintext) => plaintext,
            Err(_) => return false,
        };
        if plaintext.is_empty() || !self.validator.is_plausible(&plaintext) {
            return false;
        }

        let key = match password {
            Some(password) => KeyDescriptor::Password(password),
            None => KeyDescriptor::RawKey {
                counter,
                key_hex: key.iter().map(|b| format!("{b:02x}")).collect(),
            },
        };
        self.found.claim(Hit { key, plaintext })
    }

    /// Emit a progress event for a worker that has made `done` attempts in
    /// `partition`.
    pub fn report_progress(&self, partition: KeyspacePartition, done: u64, elapsed: Duration) {
        if !self.progress.is_enabled() {
            return;
        }
        let total = self.total().max(1);
        let covered = partition.start.saturating_add(done).min(total);
        let event = ProgressEvent::new(
            covered as f64 / total as f64,
            format!("{} search: {covered} of {total} candidates", self.label),
        )
        .with_attempts(done)
        .with_throughput(throughput(done, elapsed));
        self.progress.emit(event);
    }
}

impl fmt::Debug for PartitionJob<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionJob")
            .field("algorithm", &self.cipher.algorithm())
            .field("mode", &self.mode)
            .field("label", &self.label)
            .field("total", &self.total())
            .finish_non_exhaustive()
    }
}

/// Executes keyspace partitions.
pub trait ComputeBackend: Send + Sync {
    /// Name reported in [`AttackResult::backend`](crate::AttackResult::backend).
    fn name(&self) -> &str;

    /// Devices this backend can run on.
    fn enumerate_devices(&self) -> Vec<DeviceDescriptor>;

    /// Bind to a device on `platform`. Returns `false` when none is usable.
    fn select(&mut self, platform: Platform) -> bool;

    /// Search one partition until it is exhausted, a candidate wins anywhere
    /// or `cancel` is set.
    fn run_partition(
        &self,
        partition: KeyspacePartition,
        job: &PartitionJob<'_>,
        cancel: &CancellationToken,
    ) -> Result<PartitionReport, SpadeError>;

    /// Run every partition on its own scoped thread and join them all.
    ///
    /// Reports come back in partition order. If any worker fails or panics,
    /// the first such error is returned after all workers have been joined.
    fn run_partitions(
        &self,
        partitions: &[KeyspacePartition],
        job: &PartitionJob<'_>,
        cancel: &CancellationToken,
    ) -> Result<Vec<PartitionReport>, SpadeError> {
        let joined: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = partitions
                .iter()
                .map(|&partition| scope.spawn(move || self.run_partition(partition, job, cancel)))
                .collect();
            handles.into_iter().map(|handle| handle.join()).collect()
        });

        joined
            .into_iter()
            .map(|outcome| {
                outcome.unwrap_or_else(|_| {
                    Err(SpadeError::BackendUnavailable(format!(
                        "{} worker panicked",
                        self.name()
                    )))
                })
            })
            .collect()
    }
}
