//! Metrics module for OS utilization queries.
//!
//! This module provides the instantaneous CPU, RAM and GPU readings
//! shown by the overlay and used to pick the tray icon tier.

pub mod gpu;
pub mod sample;
pub mod source;

pub use gpu::GpuProbe;
pub use sample::{Metric, MetricSample};
pub use source::{MetricsError, MetricsSource, SystemMetrics};
