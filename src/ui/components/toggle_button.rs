//! Toggle button component.
//!
//! A checkable button that fills with the accent color while on.

use crate::ui::theme::Theme;
use eframe::egui;

/// Toggle button component.
pub struct ToggleButton;

impl ToggleButton {
    /// Render a toggle button. Returns true if it was clicked (and `on`
    /// was flipped).
    pub fn show(ui: &mut egui::Ui, theme: &Theme, on: &mut bool, text: &str, width: f32) -> bool {
        let fill = if *on { theme.accent_pressed } else { theme.surface };
        let button = egui::Button::new(egui::RichText::new(text).color(theme.text_primary))
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, if *on { fill } else { theme.border }))
            .min_size(egui::vec2(width, 32.0));

        let clicked = ui.add(button).clicked();
        if clicked {
            *on = !*on;
        }
        clicked
    }
}
