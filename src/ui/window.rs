//! Overlay window implementation using eframe/egui.
//!
//! Hosts [`AppState`] inside the eframe event loop: polls the timers every
//! frame, mirrors the animated geometry onto the native window, shows the
//! settings viewport and owns the tray icon and its worker thread.

use crate::app::AppState;
use crate::platform::TierIcons;
use crate::ui::geometry::GeometryRect;
use crate::ui::settings::{SettingsAction, SettingsDialog};
use crate::ui::theme::Theme;
use crate::ui::tray::{TrayManager, TrayState, TrayWorker};
use eframe::egui;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Native window title (never shown, the overlay is frameless).
pub const WINDOW_TITLE: &str = "System Monitor";

/// eframe application wrapping the overlay.
pub struct MonitorApp {
    state: AppState,
    tray: Option<TrayManager>,
    worker: Option<TrayWorker>,
    placed: bool,
}

impl MonitorApp {
    /// Viewport for the overlay: frameless, transparent, click-through and
    /// always on top.
    pub fn viewport_builder(width: f32, height: f32) -> egui::ViewportBuilder {
        egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([width, height])
            .with_position([0.0, 0.0])
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_always_on_top()
            .with_mouse_passthrough(true)
            .with_taskbar(false)
    }

    /// Create the app and its tray icon. A tray failure is logged and the
    /// overlay runs without one.
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        // The overlay paints with explicit colors; the style only affects the dialog
        Theme::dark().apply(&cc.egui_ctx);

        let mut app = Self {
            state,
            tray: None,
            worker: None,
            placed: false,
        };
        app.start_tray(&cc.egui_ctx);
        app
    }

    fn start_tray(&mut self, ctx: &egui::Context) {
        let icons = match TierIcons::from_default_assets() {
            Ok(icons) => icons,
            Err(e) => {
                warn!(error = %e, "tray icons unavailable, running without tray");
                return;
            }
        };

        let mut tray = TrayManager::new(icons);
        let ids = match tray.create(TrayState::default()) {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "tray icon unavailable, running without tray");
                return;
            }
        };

        let wake_ctx = ctx.clone();
        match TrayWorker::spawn(ids, Arc::clone(self.state.shared()), move || {
            wake_ctx.request_repaint()
        }) {
            Ok(worker) => self.worker = Some(worker),
            Err(e) => warn!(error = %e, "tray menu will not respond"),
        }
        self.tray = Some(tray);
    }

    /// Monitor width in points, once the backend reports it.
    fn screen_width(ctx: &egui::Context) -> Option<f32> {
        ctx.input(|i| i.viewport().monitor_size).map(|size| size.x)
    }

    /// Move and resize the native window to `rect`.
    fn sync_viewport(ctx: &egui::Context, rect: GeometryRect) {
        ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
            rect.x.round(),
            rect.y.round(),
        )));
        ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
            rect.width.round(),
            rect.height.round(),
        )));
    }

    fn show_settings(&mut self, ctx: &egui::Context, screen_width: f32, now: Instant) {
        let monitor_size = ctx.input(|i| i.viewport().monitor_size);
        let Some(dialog) = self.state.settings.as_mut() else {
            return;
        };

        let action = ctx.show_viewport_immediate(
            SettingsDialog::viewport_id(),
            SettingsDialog::viewport_builder(monitor_size),
            |ctx, _class| {
                let mut action = dialog.show(ctx);
                if ctx.input(|i| i.viewport().close_requested()) {
                    action = Some(SettingsAction::Close);
                }
                action
            },
        );

        match action {
            Some(SettingsAction::Save) => {
                if let Err(e) = self.state.save_settings(screen_width, now) {
                    warn!(error = %e, "settings not saved");
                }
            }
            Some(SettingsAction::Close) => self.state.close_settings(),
            None => {}
        }
    }

    fn shutdown(&mut self, ctx: &egui::Context) {
        info!("shutting down");
        if let Some(mut worker) = self.worker.take() {
            worker.stop();
        }
        if let Some(mut tray) = self.tray.take() {
            tray.destroy();
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

impl eframe::App for MonitorApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let screen_width = Self::screen_width(ctx);

        if !self.placed {
            if let Some(width) = screen_width {
                let rect = self.state.overlay.place_on_screen(width);
                Self::sync_viewport(ctx, rect);
                self.placed = true;
            }
        }

        if let Some(tray_state) = self.state.poll_tick(now) {
            if let Some(tray) = self.tray.as_mut() {
                if let Err(e) = tray.apply(tray_state) {
                    debug!(error = %e, "tray refresh skipped");
                }
            }
        } else {
            // Requests raised between ticks wake the UI early
            self.state.handle_requests();
        }

        if self.state.should_exit {
            self.shutdown(ctx);
            return;
        }

        if let Some(rect) = self.state.overlay.poll_animation(now) {
            Self::sync_viewport(ctx, rect);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.state.overlay.paint(ui.painter()));

        // Without a monitor size keep the overlay centered where it is
        let screen_width = screen_width.unwrap_or_else(|| {
            let target = self.state.overlay.geometry().target();
            target.x * 2.0 + target.width
        });
        self.show_settings(ctx, screen_width, now);

        ctx.request_repaint_after(self.state.overlay.next_wakeup(now));
    }
}
