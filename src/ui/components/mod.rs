//! Reusable UI components for the overlay and settings dialog.
//!
//! This module contains the individual painted pieces shared by the windows.

pub mod metric_label;
pub mod toggle_button;

pub use metric_label::MetricLabel;
pub use toggle_button::ToggleButton;
