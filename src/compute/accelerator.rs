//! src/compute/accelerator.rs
//! Device-offload backend.
//!
//! No CUDA or OpenCL kernels are linked into this crate, so the backend
//! enumerates no devices and every partition fails with
//! [`SpadeError::BackendUnavailable`]. The engine turns that into a CPU
//! fallback when configured to.

use super::{ComputeBackend, DeviceDescriptor, PartitionJob, PartitionReport, Platform};
use crate::cancel::CancellationToken;
use crate::error::SpadeError;
use crate::keyspace::KeyspacePartition;

#[derive(Debug, Clone, Default)]
pub struct AcceleratorBackend {
    selected: Option<DeviceDescriptor>,
    requested: Platform,
}

impl AcceleratorBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Device bound by the last successful [`select`](ComputeBackend::select).
    #[must_use]
    pub fn selected_device(&self) -> Option<&DeviceDescriptor> {
        self.selected.as_ref()
    }
}

impl ComputeBackend for AcceleratorBackend {
    fn name(&self) -> &str {
        "accelerator"
    }

    fn enumerate_devices(&self) -> Vec<DeviceDescriptor> {
        Vec::new()
    }

    fn select(&mut self, platform: Platform) -> bool {
        self.requested = platform;
        self.selected = self.enumerate_devices().into_iter().find(|device| {
            device
                .platform
                .is_some_and(|device_platform| platform.matches(device_platform))
        });
        self.selected.is_some()
    }

    fn run_partition(
        &self,
        _partition: KeyspacePartition,
        _job: &PartitionJob<'_>,
        _cancel: &CancellationToken,
    ) -> Result<PartitionReport, SpadeError> {
        match &self.selected {
            Some(device) => Err(SpadeError::BackendUnavailable(format!(
                "no kernels linked for device {}",
                device.name
            ))),
            None => Err(SpadeError::BackendUnavailable(format!(
                "no {} device available",
                self.requested
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_fails_without_devices() {
        let mut backend = AcceleratorBackend::new();
        assert!(backend.enumerate_devices().is_empty());
        for platform in [Platform::Cuda, Platform::OpenCl, Platform::Auto] {
            assert!(!backend.select(platform));
            assert!(backend.selected_device().is_none());
        }
    }
}
