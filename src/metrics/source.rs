//! System metrics source.
//!
//! Wraps `sysinfo` for CPU and memory and [`GpuProbe`] for the GPU.

use super::gpu::GpuProbe;
use super::sample::MetricSample;
use sysinfo::System;
use thiserror::Error;

/// Metrics service error types.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("No memory information reported")]
    MemoryUnavailable,
}

/// Anything that can produce a [`MetricSample`] on demand.
///
/// Implementations must not block for longer than a small fraction of the
/// refresh tick.
pub trait MetricsSource {
    fn sample(&mut self) -> Result<MetricSample, MetricsError>;
}

/// Live OS-backed metrics source.
pub struct SystemMetrics {
    system: System,
    gpu: GpuProbe,
}

impl SystemMetrics {
    /// Create a source backed by `sysinfo` and the given GPU probe.
    ///
    /// Takes an initial CPU reading so the first real sample has a
    /// baseline; that first sample may still read 0.
    pub fn new(gpu: GpuProbe) -> Self {
        let mut system = System::new();
        system.refresh_cpu_usage();
        Self { system, gpu }
    }
}

impl MetricsSource for SystemMetrics {
    fn sample(&mut self) -> Result<MetricSample, MetricsError> {
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();

        let cpu = self.system.global_cpu_usage();
        let total = self.system.total_memory();
        if total == 0 {
            return Err(MetricsError::MemoryUnavailable);
        }
        let ram = (self.system.used_memory() as f64 / total as f64 * 100.0) as f32;

        Ok(MetricSample::new(cpu, ram, self.gpu.utilization()))
    }
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self::new(GpuProbe::new())
    }
}
