//! Application state and lifecycle management.
//!
//! Owns the overlay, the profile store and the optional settings dialog,
//! and turns tray requests into state changes. Nothing here touches a
//! window, so the whole lifecycle is testable headless.

use crate::metrics::MetricsSource;
use crate::platform::ProfileStore;
use crate::shared::SharedContext;
use crate::ui::settings::SettingsError;
use crate::ui::{OverlayWidget, SettingsDialog, TrayState};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Main application state.
pub struct AppState {
    /// The metrics overlay
    pub overlay: OverlayWidget,

    /// Where the profile is persisted
    pub store: ProfileStore,

    /// Open settings dialog, if any
    pub settings: Option<SettingsDialog>,

    /// Whether the application should exit
    pub should_exit: bool,

    shared: Arc<SharedContext>,
}

impl AppState {
    /// Load (or create) the profile and build the overlay around it.
    pub fn new(
        store: ProfileStore,
        source: Box<dyn MetricsSource>,
        shared: Arc<SharedContext>,
        now: Instant,
    ) -> Self {
        let profile = store.load_or_init();
        let overlay = OverlayWidget::new(profile, source, Arc::clone(&shared), now);

        Self {
            overlay,
            store,
            settings: None,
            should_exit: false,
            shared,
        }
    }

    pub fn shared(&self) -> &Arc<SharedContext> {
        &self.shared
    }

    /// Run the refresh tick if it is due and service tray requests.
    ///
    /// Returns the tray state derived from the new sample, if a tick ran.
    pub fn poll_tick(&mut self, now: Instant) -> Option<TrayState> {
        let tray = self
            .overlay
            .poll_refresh(now)
            .map(|sample| TrayState::from_cpu(sample.cpu_percent));
        self.handle_requests();
        tray
    }

    /// Consume the one-shot requests raised by the tray menu.
    pub fn handle_requests(&mut self) {
        if self.shared.take_open_settings() {
            self.open_settings();
        }
        if self.shared.take_quit() {
            info!("quit requested");
            self.should_exit = true;
        }
    }

    /// Open the settings dialog over the live profile. No-op if already open.
    pub fn open_settings(&mut self) {
        if self.settings.is_none() {
            info!("opening settings");
            self.settings = Some(SettingsDialog::new(self.overlay.profile()));
        }
    }

    /// Close the dialog, discarding unsaved edits.
    pub fn close_settings(&mut self) {
        self.settings = None;
    }

    /// Persist the dialog's draft and apply it to the overlay.
    ///
    /// The dialog stays open after a successful save.
    pub fn save_settings(&mut self, screen_width: f32, now: Instant) -> Result<(), SettingsError> {
        let Some(dialog) = self.settings.as_mut() else {
            return Ok(());
        };
        let overlay = &mut self.overlay;
        dialog.save(&self.store, |profile| {
            overlay.apply_profile(profile.clone(), screen_width, now);
        })
    }
}
