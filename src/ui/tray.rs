//! System tray icon management.
//!
//! Manages the tray icon, its CPU tier and tooltip, the Settings/Quit menu,
//! and the background worker that turns menu clicks into requests.

use crate::platform::TierIcons;
use crate::shared::SharedContext;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use tray_icon::{
    menu::{Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem},
    TrayIcon, TrayIconBuilder, TrayIconEvent,
};

/// Tooltip shown before the first sample arrives.
pub const INITIAL_TOOLTIP: &str = "System Monitor";

/// How long the worker waits for a menu event before rechecking its stop flag.
const WORKER_POLL: Duration = Duration::from_millis(250);

/// CPU load bucket driving the tray icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrayTier {
    /// CPU at or below 50%
    #[default]
    Low,
    /// CPU above 50% and at most 80%
    Medium,
    /// CPU above 80%
    High,
}

impl TrayTier {
    /// Bucket a CPU percentage. No hysteresis.
    pub fn from_cpu(cpu_percent: f32) -> Self {
        if cpu_percent > 80.0 {
            TrayTier::High
        } else if cpu_percent > 50.0 {
            TrayTier::Medium
        } else {
            TrayTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrayTier::Low => "low",
            TrayTier::Medium => "medium",
            TrayTier::High => "high",
        }
    }
}

/// Tray icon tier and tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayState {
    pub tier: TrayTier,
    pub tooltip: String,
}

impl TrayState {
    /// Derive the tray state from the latest CPU reading.
    pub fn from_cpu(cpu_percent: f32) -> Self {
        Self {
            tier: TrayTier::from_cpu(cpu_percent),
            tooltip: format!("CPU: {}%", cpu_percent.max(0.0) as u32),
        }
    }

    /// Whether moving to `next` needs a new tray image.
    pub fn icon_changed(&self, next: &TrayState) -> bool {
        self.tier != next.tier
    }
}

impl Default for TrayState {
    fn default() -> Self {
        Self {
            tier: TrayTier::Low,
            tooltip: INITIAL_TOOLTIP.to_string(),
        }
    }
}

/// Menu item identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItemId {
    Settings,
    Quit,
}

impl MenuItemId {
    /// Raise the shared request flag for this menu action.
    pub fn raise(self, shared: &SharedContext) {
        match self {
            MenuItemId::Settings => shared.request_open_settings(),
            MenuItemId::Quit => shared.request_quit(),
        }
    }
}

/// Ids assigned to the menu entries when the tray was created.
#[derive(Debug, Clone)]
pub struct TrayMenuIds {
    pub settings: MenuId,
    pub quit: MenuId,
}

impl TrayMenuIds {
    /// Map a clicked menu id back to its action.
    pub fn resolve(&self, id: &MenuId) -> Option<MenuItemId> {
        if id == &self.settings {
            Some(MenuItemId::Settings)
        } else if id == &self.quit {
            Some(MenuItemId::Quit)
        } else {
            None
        }
    }
}

/// Tray service error types.
#[derive(Debug, Error)]
pub enum TrayError {
    #[error("Failed to create tray icon: {0}")]
    CreateFailed(String),

    #[error("Failed to load icon resource")]
    IconLoadFailed,

    #[error("Tray icon not initialized")]
    NotInitialized,

    #[error("Failed to create menu: {0}")]
    MenuFailed(String),

    #[error("Failed to start tray worker: {0}")]
    WorkerFailed(String),
}

/// System tray manager.
pub struct TrayManager {
    tray_icon: Option<TrayIcon>,
    icons: TierIcons,
    state: TrayState,
}

impl TrayManager {
    /// Create a new TrayManager using the given tier icons.
    pub fn new(icons: TierIcons) -> Self {
        Self {
            tray_icon: None,
            icons,
            state: TrayState::default(),
        }
    }

    /// Create and show the tray icon with its Settings/Quit menu.
    pub fn create(&mut self, initial_state: TrayState) -> Result<TrayMenuIds, TrayError> {
        let menu = Menu::new();

        let settings_item = MenuItem::new("Settings", true, None);
        menu.append(&settings_item)
            .map_err(|e| TrayError::MenuFailed(e.to_string()))?;

        menu.append(&PredefinedMenuItem::separator())
            .map_err(|e| TrayError::MenuFailed(e.to_string()))?;

        let quit_item = MenuItem::new("Quit", true, None);
        menu.append(&quit_item)
            .map_err(|e| TrayError::MenuFailed(e.to_string()))?;

        let ids = TrayMenuIds {
            settings: settings_item.id().clone(),
            quit: quit_item.id().clone(),
        };

        let tray_icon = TrayIconBuilder::new()
            .with_icon(self.icons.get(initial_state.tier).clone())
            .with_tooltip(&initial_state.tooltip)
            .with_menu(Box::new(menu))
            .build()
            .map_err(|e| TrayError::CreateFailed(e.to_string()))?;

        info!("tray icon created");
        self.tray_icon = Some(tray_icon);
        self.state = initial_state;

        Ok(ids)
    }

    /// Apply a freshly derived tray state.
    ///
    /// The icon is swapped only when the tier changes; the tooltip is
    /// always rewritten.
    pub fn apply(&mut self, state: TrayState) -> Result<(), TrayError> {
        let tray = self.tray_icon.as_mut().ok_or(TrayError::NotInitialized)?;

        if self.state.icon_changed(&state) {
            debug!(tier = state.tier.as_str(), "tray tier changed");
            tray.set_icon(Some(self.icons.get(state.tier).clone()))
                .map_err(|e| TrayError::CreateFailed(e.to_string()))?;
        }
        tray.set_tooltip(Some(&state.tooltip))
            .map_err(|e| TrayError::CreateFailed(e.to_string()))?;

        self.state = state;
        Ok(())
    }

    /// Destroy the tray icon.
    pub fn destroy(&mut self) {
        self.tray_icon = None;
    }
}

/// Background thread translating tray menu clicks into shared requests.
pub struct TrayWorker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TrayWorker {
    /// Start the worker.
    ///
    /// `wake` is called after every raised request so the UI thread
    /// notices it without waiting for its next scheduled frame.
    pub fn spawn<F>(
        ids: TrayMenuIds,
        shared: Arc<SharedContext>,
        wake: F,
    ) -> Result<Self, TrayError>
    where
        F: Fn() + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("tray-worker".to_string())
            .spawn(move || {
                let events = MenuEvent::receiver();
                while !stop_flag.load(Ordering::Acquire) {
                    // Icon clicks carry no action; drain them so the channel stays bounded
                    while TrayIconEvent::receiver().try_recv().is_ok() {}

                    match events.recv_timeout(WORKER_POLL) {
                        Ok(event) => {
                            if let Some(item) = ids.resolve(&event.id) {
                                debug!(?item, "tray menu clicked");
                                item.raise(&shared);
                                wake();
                            }
                        }
                        Err(e) if e.is_disconnected() => {
                            warn!("tray menu channel closed");
                            break;
                        }
                        Err(_) => {}
                    }
                }
                debug!("tray worker stopped");
            })
            .map_err(|e| TrayError::WorkerFailed(e.to_string()))?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Signal the worker to stop and wait for it.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("tray worker panicked");
            }
        }
    }
}

impl Drop for TrayWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(TrayTier::from_cpu(0.0), TrayTier::Low);
        assert_eq!(TrayTier::from_cpu(50.0), TrayTier::Low);
        assert_eq!(TrayTier::from_cpu(51.0), TrayTier::Medium);
        assert_eq!(TrayTier::from_cpu(80.0), TrayTier::Medium);
        assert_eq!(TrayTier::from_cpu(81.0), TrayTier::High);
        assert_eq!(TrayTier::from_cpu(100.0), TrayTier::High);
    }

    #[test]
    fn test_tier_for_every_whole_percent() {
        for cpu in 0..=100u32 {
            let expected = match cpu {
                0..=50 => TrayTier::Low,
                51..=80 => TrayTier::Medium,
                _ => TrayTier::High,
            };
            assert_eq!(TrayTier::from_cpu(cpu as f32), expected, "cpu={cpu}");
        }
    }

    #[test]
    fn test_tray_state_from_cpu() {
        let state = TrayState::from_cpu(85.4);
        assert_eq!(state.tier, TrayTier::High);
        assert_eq!(state.tooltip, "CPU: 85%");
        assert_eq!(TrayState::from_cpu(85.4), state);
    }

    #[test]
    fn test_icon_swapped_only_on_tier_change() {
        let current = TrayState::from_cpu(60.0);

        let same_tier = TrayState::from_cpu(75.0);
        assert_ne!(same_tier.tooltip, current.tooltip);
        assert!(!current.icon_changed(&same_tier));
        assert!(!current.icon_changed(&current.clone()));

        assert!(current.icon_changed(&TrayState::from_cpu(81.0)));
        assert!(current.icon_changed(&TrayState::from_cpu(50.0)));
        assert!(TrayState::default().icon_changed(&TrayState::from_cpu(51.0)));
        assert!(!TrayState::default().icon_changed(&TrayState::from_cpu(3.0)));
    }

    #[test]
    fn test_initial_state() {
        let state = TrayState::default();
        assert_eq!(state.tier, TrayTier::Low);
        assert_eq!(state.tooltip, INITIAL_TOOLTIP);
    }

    #[test]
    fn test_menu_ids_resolve() {
        let ids = TrayMenuIds {
            settings: MenuId::new("settings"),
            quit: MenuId::new("quit"),
        };
        assert_eq!(
            ids.resolve(&MenuId::new("settings")),
            Some(MenuItemId::Settings)
        );
        assert_eq!(ids.resolve(&MenuId::new("quit")), Some(MenuItemId::Quit));
        assert_eq!(ids.resolve(&MenuId::new("other")), None);
    }

    #[test]
    fn test_menu_items_raise_requests() {
        let shared = SharedContext::new();
        MenuItemId::Settings.raise(&shared);
        assert!(shared.take_open_settings());
        assert!(!shared.take_quit());

        MenuItemId::Quit.raise(&shared);
        assert!(shared.take_quit());
    }

    #[test]
    fn test_worker_stops_on_request() {
        let ids = TrayMenuIds {
            settings: MenuId::new("settings"),
            quit: MenuId::new("quit"),
        };
        let shared = Arc::new(SharedContext::new());
        let mut worker = TrayWorker::spawn(ids, Arc::clone(&shared), || {}).unwrap();
        worker.stop();
        assert!(worker.handle.is_none());
        assert!(!shared.take_quit());
    }
}
