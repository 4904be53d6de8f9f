//! src/compute/cpu.rs

use std::time::Instant;

use super::{ComputeBackend, DeviceDescriptor, PartitionJob, PartitionReport, Platform};
use crate::cancel::CancellationToken;
use crate::error::SpadeError;
use crate::keyspace::KeyspacePartition;

/// Host-thread backend: one OS thread per partition, candidates tested in
/// ascending index order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuBackend;

impl CpuBackend {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ComputeBackend for CpuBackend {
    fn name(&self) -> &str {
        "cpu"
    }

    fn enumerate_devices(&self) -> Vec<DeviceDescriptor> {
        vec![DeviceDescriptor {
            name: "host CPU".to_string(),
            platform: None,
            compute_units: num_cpus::get().max(1),
        }]
    }

    /// The CPU is not a device platform; only [`Platform::Auto`] selects it.
    fn select(&mut self, platform: Platform) -> bool {
        platform == Platform::Auto
    }

    fn run_partition(
        &self,
        partition: KeyspacePartition,
        job: &PartitionJob<'_>,
        cancel: &CancellationToken,
    ) -> Result<PartitionReport, SpadeError> {
        let started = Instant::now();
        let interval = job.progress_interval().max(1);
        let mut attempts = 0u64;
        let mut won = false;

        for index in partition.start..partition.end {
            if job.should_stop(cancel) {
                break;
            }
            attempts += 1;
            if job.try_index(index) {
                won = true;
                break;
            }
            if attempts % interval == 0 {
                job.report_progress(partition, attempts, started.elapsed());
            }
        }

        Ok(PartitionReport::new(attempts, won, started.elapsed()))
    }
}
