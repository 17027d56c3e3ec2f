#![windows_subsystem = "windows"]

use anyhow::anyhow;
use std::sync::Arc;
use std::time::Instant;
use sysmon_overlay::ui::geometry::WIDGET_HEIGHT;
use sysmon_overlay::ui::window::WINDOW_TITLE;
use sysmon_overlay::{AppState, MonitorApp, ProfileStore, SharedContext, SystemMetrics};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sysmon_overlay=info")),
        )
        .init();

    let shared = Arc::new(SharedContext::new());
    let store = ProfileStore::beside_executable();
    info!(path = %store.path().display(), "starting system monitor");

    let source = Box::new(SystemMetrics::default());
    let state = AppState::new(store, source, shared, Instant::now());
    let width = state.overlay.geometry().current().width;

    let options = eframe::NativeOptions {
        viewport: MonitorApp::viewport_builder(width, WIDGET_HEIGHT),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(MonitorApp::new(cc, state)))),
    )
    .map_err(|e| anyhow!("GUI initialization failed: {e}"))
}
