//! Settings dialog implementation using eframe/egui.
//!
//! Edits a copy of the profile. Nothing reaches the live overlay until
//! Save persists the draft and hands it to the save callback.

use crate::metrics::Metric;
use crate::platform::{Profile, ProfileError, ProfileStore, FONT_SIZES, MAX_FONT_SIZE};
use crate::ui::components::ToggleButton;
use crate::ui::theme::Theme;
use eframe::egui;
use thiserror::Error;
use tracing::info;

/// Settings window title.
pub const SETTINGS_TITLE: &str = "System Monitor | Widget Settings";

/// Fixed settings window size.
pub const SETTINGS_SIZE: [f32; 2] = [300.0, 500.0];

const CONTROL_WIDTH: f32 = 243.0;

/// Actions that can be triggered from the settings dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    /// Persist the draft and apply it
    Save,
    /// Discard the draft and close
    Close,
}

/// Settings save error types.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("At least one metric must be visible")]
    NothingVisible,

    #[error(transparent)]
    Store(#[from] ProfileError),
}

/// Settings dialog state.
pub struct SettingsDialog {
    draft: Profile,
    error: Option<String>,
    theme: Theme,
}

impl SettingsDialog {
    /// Open the dialog over a copy of `current`.
    pub fn new(current: &Profile) -> Self {
        Self {
            draft: current.clone(),
            error: None,
            theme: Theme::dark(),
        }
    }

    /// Viewport of the dialog window.
    pub fn viewport_id() -> egui::ViewportId {
        egui::ViewportId::from_hash_of("settings")
    }

    /// Fixed-size dialog window, centered on the monitor once its size is known.
    pub fn viewport_builder(monitor_size: Option<egui::Vec2>) -> egui::ViewportBuilder {
        let builder = egui::ViewportBuilder::default()
            .with_title(SETTINGS_TITLE)
            .with_inner_size(SETTINGS_SIZE)
            .with_resizable(false)
            .with_always_on_top();
        match monitor_size {
            Some(size) => builder.with_position(centered_position(size)),
            None => builder,
        }
    }

    /// The edited profile.
    pub fn draft(&self) -> &Profile {
        &self.draft
    }

    /// Last save error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_shown(&mut self, metric: Metric, shown: bool) {
        self.draft.show_values.set(metric, shown);
    }

    pub fn toggle(&mut self, metric: Metric) {
        let shown = self.draft.show_values.is_shown(metric);
        self.set_shown(metric, !shown);
    }

    pub fn set_font_size(&mut self, size: u32) {
        if (1..=MAX_FONT_SIZE).contains(&size) {
            self.draft.font_size = size;
        }
    }

    /// Save is only allowed while at least one metric is visible.
    pub fn can_save(&self) -> bool {
        self.draft.show_values.any()
    }

    /// Persist the draft, then pass it to `on_save`.
    ///
    /// The callback is not invoked if persisting fails; the error is kept
    /// for display.
    pub fn save<F>(&mut self, store: &ProfileStore, on_save: F) -> Result<(), SettingsError>
    where
        F: FnOnce(&Profile),
    {
        if !self.can_save() {
            return Err(SettingsError::NothingVisible);
        }
        if let Err(e) = store.save(&self.draft) {
            self.error = Some(e.to_string());
            return Err(e.into());
        }

        info!(
            metrics = self.draft.enabled_count(),
            font_size = self.draft.font_size,
            "settings saved"
        );
        self.error = None;
        on_save(&self.draft);
        Ok(())
    }

    /// Render the dialog content.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsAction> {
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("Widget Settings")
                    .size(24.0)
                    .strong()
                    .color(self.theme.text_primary),
            );
            ui.add_space(32.0);

            ui.vertical_centered(|ui| {
                ui.spacing_mut().item_spacing.y = 20.0;

                for metric in Metric::ALL {
                    let mut on = self.draft.show_values.is_shown(metric);
                    let text = format!("SHOW {} USAGE", metric.label());
                    if ToggleButton::show(ui, &self.theme, &mut on, &text, CONTROL_WIDTH) {
                        self.set_shown(metric, on);
                    }
                }

                ui.separator();

                ui.label(egui::RichText::new("Font size:").size(16.0));
                let mut size = self.draft.font_size;
                egui::ComboBox::from_id_salt("font_size")
                    .selected_text(size.to_string())
                    .width(CONTROL_WIDTH)
                    .show_ui(ui, |ui| {
                        for option in FONT_SIZES {
                            ui.selectable_value(&mut size, option, option.to_string());
                        }
                    });
                self.set_font_size(size);

                if let Some(ref error) = self.error {
                    ui.colored_label(self.theme.error, error);
                }
            });

            ui.with_layout(egui::Layout::bottom_up(egui::Align::Max), |ui| {
                ui.horizontal(|ui| {
                    let can_save = self.can_save();
                    let save_fill = if can_save {
                        self.theme.accent
                    } else {
                        self.theme.disabled
                    };
                    let save_text = if can_save {
                        self.theme.text_primary
                    } else {
                        self.theme.text_secondary
                    };
                    let save = egui::Button::new(egui::RichText::new("Save").color(save_text))
                        .fill(save_fill)
                        .min_size(egui::vec2(80.0, 32.0));
                    if ui.add_enabled(can_save, save).clicked() {
                        action = Some(SettingsAction::Save);
                    }

                    let close = egui::Button::new("Close")
                        .fill(self.theme.surface)
                        .min_size(egui::vec2(80.0, 32.0));
                    if ui.add(close).clicked() {
                        action = Some(SettingsAction::Close);
                    }
                });
            });
        });

        action
    }
}

/// Top-left corner that centers the dialog on a monitor of `monitor_size`.
fn centered_position(monitor_size: egui::Vec2) -> egui::Pos2 {
    let [width, height] = SETTINGS_SIZE;
    egui::pos2(
        ((monitor_size.x - width) / 2.0).max(0.0).trunc(),
        ((monitor_size.y - height) / 2.0).max(0.0).trunc(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MetricVisibility;

    fn store() -> (tempfile::TempDir, ProfileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("profile.json"));
        (dir, store)
    }

    #[test]
    fn test_edits_do_not_touch_live_profile() {
        let live = Profile::default();
        let mut dialog = SettingsDialog::new(&live);
        dialog.toggle(Metric::Gpu);
        dialog.set_font_size(16);

        assert_eq!(live, Profile::default());
        assert!(!dialog.draft().show_values.gpu);
        assert_eq!(dialog.draft().font_size, 16);
    }

    #[test]
    fn test_save_disabled_when_all_metrics_off() {
        let mut dialog = SettingsDialog::new(&Profile::default());
        for metric in Metric::ALL {
            assert!(dialog.can_save());
            dialog.set_shown(metric, false);
        }
        assert!(!dialog.can_save());

        dialog.toggle(Metric::Ram);
        assert!(dialog.can_save());
    }

    #[test]
    fn test_save_rejected_without_visible_metrics() {
        let (_dir, store) = store();
        let mut profile = Profile::default();
        profile.show_values = MetricVisibility::none();
        let mut dialog = SettingsDialog::new(&profile);

        let mut called = false;
        let result = dialog.save(&store, |_| called = true);
        assert!(matches!(result, Err(SettingsError::NothingVisible)));
        assert!(!called);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_save_persists_then_notifies() {
        let (_dir, store) = store();
        let mut dialog = SettingsDialog::new(&Profile::default());
        dialog.set_shown(Metric::Cpu, false);
        dialog.set_font_size(8);

        let mut received = None;
        dialog
            .save(&store, |profile| received = Some(profile.clone()))
            .unwrap();

        let saved = received.unwrap();
        assert_eq!(saved.enabled_metrics(), vec![Metric::Gpu, Metric::Ram]);
        assert_eq!(saved.font_size, 8);
        assert_eq!(store.load(), Some(saved));
        assert!(dialog.error().is_none());
    }

    #[test]
    fn test_failed_save_keeps_error_and_skips_callback() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("missing").join("profile.json"));
        let mut dialog = SettingsDialog::new(&Profile::default());

        let mut called = false;
        let result = dialog.save(&store, |_| called = true);
        assert!(matches!(result, Err(SettingsError::Store(_))));
        assert!(!called);
        assert!(dialog.error().is_some());
    }

    #[test]
    fn test_out_of_range_font_size_ignored() {
        let mut dialog = SettingsDialog::new(&Profile::default());
        dialog.set_font_size(0);
        assert_eq!(dialog.draft().font_size, 12);
        dialog.set_font_size(MAX_FONT_SIZE + 1);
        assert_eq!(dialog.draft().font_size, 12);
    }

    #[test]
    fn test_dialog_centered_on_monitor() {
        assert_eq!(
            centered_position(egui::vec2(1920.0, 1080.0)),
            egui::pos2(810.0, 290.0)
        );
        // Smaller than the dialog: pinned to the corner
        assert_eq!(centered_position(egui::vec2(200.0, 300.0)), egui::Pos2::ZERO);
    }
}
