//! State shared between the UI thread and the tray worker.
//!
//! The tray worker only ever raises the two request flags; the UI tick
//! consumes them and owns the latest metric snapshot.

use crate::metrics::MetricSample;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Request flags and the latest sample, shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct SharedContext {
    open_settings_requested: AtomicBool,
    quit_requested: AtomicBool,
    latest_sample: Mutex<Option<MetricSample>>,
}

impl SharedContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the UI thread to open the settings dialog.
    pub fn request_open_settings(&self) {
        self.open_settings_requested.store(true, Ordering::Release);
    }

    /// Ask the UI thread to shut down.
    pub fn request_quit(&self) {
        self.quit_requested.store(true, Ordering::Release);
    }

    /// Consume a pending open-settings request.
    pub fn take_open_settings(&self) -> bool {
        self.open_settings_requested.swap(false, Ordering::AcqRel)
    }

    /// Consume a pending quit request.
    pub fn take_quit(&self) -> bool {
        self.quit_requested.swap(false, Ordering::AcqRel)
    }

    pub fn store_sample(&self, sample: MetricSample) {
        let mut latest = self
            .latest_sample
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *latest = Some(sample);
    }

    pub fn latest_sample(&self) -> Option<MetricSample> {
        *self
            .latest_sample
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
