//! System Monitor Overlay - Library
//!
//! An always-on-top overlay showing live CPU, GPU and RAM utilization,
//! with a system tray icon reflecting CPU load.
//!
//! ## Features
//!
//! - Frameless, click-through overlay refreshed once per second
//! - Smooth resize animation when metrics are shown or hidden
//! - Tray icon tiers (low/medium/high) with a CPU tooltip
//! - Settings dialog for visible metrics and font size
//! - JSON profile persisted beside the executable

pub mod app;
pub mod metrics;
pub mod platform;
pub mod shared;
pub mod ui;

pub use app::AppState;
pub use metrics::{Metric, MetricSample, MetricsError, MetricsSource, SystemMetrics};
pub use platform::{MetricVisibility, Profile, ProfileError, ProfileStore, RgbColor};
pub use shared::SharedContext;
pub use ui::{MonitorApp, OverlayWidget, SettingsDialog, TrayManager, TrayState, TrayTier};
