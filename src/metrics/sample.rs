//! Metric data models.
//!
//! Defines the per-tick utilization snapshot and the fixed set of
//! metrics the overlay knows how to display.

/// One of the three displayable metrics, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Cpu,
    Gpu,
    Ram,
}

impl Metric {
    /// All metrics in the order they are drawn (CPU, GPU, RAM).
    pub const ALL: [Metric; 3] = [Metric::Cpu, Metric::Gpu, Metric::Ram];

    /// Short label prefix drawn before the value.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Cpu => "CPU",
            Metric::Gpu => "GPU",
            Metric::Ram => "RAM",
        }
    }
}

/// Instantaneous utilization snapshot. Re-created on every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample {
    /// CPU utilization since the previous sample (0.0 to 100.0)
    pub cpu_percent: f32,

    /// Physical memory in use (0.0 to 100.0)
    pub ram_percent: f32,

    /// GPU utilization, `None` when no GPU could be queried
    pub gpu_percent: Option<f32>,
}

impl MetricSample {
    /// Create a sample, clamping every reading into 0..=100.
    pub fn new(cpu_percent: f32, ram_percent: f32, gpu_percent: Option<f32>) -> Self {
        Self {
            cpu_percent: clamp_percent(cpu_percent),
            ram_percent: clamp_percent(ram_percent),
            gpu_percent: gpu_percent.map(clamp_percent),
        }
    }

    /// Reading for a metric, `None` only for an absent GPU.
    pub fn value(&self, metric: Metric) -> Option<f32> {
        match metric {
            Metric::Cpu => Some(self.cpu_percent),
            Metric::Gpu => self.gpu_percent,
            Metric::Ram => Some(self.ram_percent),
        }
    }

    /// Overlay label text for a metric, e.g. `CPU: 85%` or `GPU: —`.
    pub fn label(&self, metric: Metric) -> String {
        match self.value(metric) {
            Some(value) => format!("{}: {}%", metric.label(), value as u32),
            None => format!("{}: —", metric.label()),
        }
    }
}

fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
