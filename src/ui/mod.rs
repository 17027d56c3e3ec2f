//! UI module for the overlay, settings dialog and system tray.
//!
//! This module provides the user interface components including the
//! overlay widget and its animation, the settings dialog, the tray icon,
//! and reusable painted components.

pub mod components;
pub mod geometry;
pub mod overlay;
pub mod settings;
pub mod theme;
pub mod timer;
pub mod tray;
pub mod window;

pub use geometry::{AnimationPhase, GeometryRect, GeometryState};
pub use overlay::OverlayWidget;
pub use settings::{SettingsAction, SettingsDialog, SettingsError};
pub use tray::{MenuItemId, TrayError, TrayManager, TrayMenuIds, TrayState, TrayTier, TrayWorker};
pub use window::MonitorApp;
