//! tests/compute_tests.rs

use spadeace::{AcceleratorBackend, ComputeBackend, CpuBackend, Platform};

#[test]
fn cpu_backend_reports_the_host() {
    let cpu = CpuBackend::new();
    assert_eq!(cpu.name(), "cpu");
    let devices = cpu.enumerate_devices();
    assert_eq!(devices.len(), 1);
    assert!(devices[0].platform.is_none());
    assert!(devices[0].compute_units >= 1);
}

#[test]
fn cpu_backend_only_answers_auto() {
    let mut cpu = CpuBackend::new();
    assert!(cpu.select(Platform::Auto));
    assert!(!cpu.select(Platform::Cuda));
}

#[test]
fn accelerator_has_no_devices() {
    let mut accelerator = AcceleratorBackend::new();
    assert_eq!(accelerator.name(), "accelerator");
    assert!(accelerator.enumerate_devices().is_empty());
    assert!(!accelerator.select(Platform::OpenCl));
    assert!(accelerator.selected_device().is_none());
}

#[test]
fn backends_are_object_safe() {
    let backends: Vec<Box<dyn ComputeBackend>> =
        vec![Box::new(CpuBackend::new()), Box::new(AcceleratorBackend::new())];
    let names: Vec<_> = backends.iter().map(|b| b.name().to_string()).collect();
    assert_eq!(names, ["cpu", "accelerator"]);
}
