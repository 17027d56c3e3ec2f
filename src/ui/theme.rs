//! Dark styling and theme colors.
//!
//! Provides the dark, teal-accented styling used by the settings dialog.

use crate::platform::RgbColor;
use eframe::egui;

/// Dark theme colors.
pub struct Theme {
    /// Background color
    pub background: egui::Color32,

    /// Surface color (buttons, inputs)
    pub surface: egui::Color32,

    /// Primary accent color
    pub accent: egui::Color32,

    /// Accent for toggled-on buttons
    pub accent_pressed: egui::Color32,

    /// Text primary color
    pub text_primary: egui::Color32,

    /// Text secondary color
    pub text_secondary: egui::Color32,

    /// Disabled button fill
    pub disabled: egui::Color32,

    /// Error text color
    pub error: egui::Color32,

    /// Border color
    pub border: egui::Color32,
}

impl Theme {
    /// Create the dark theme.
    pub fn dark() -> Self {
        Self {
            background: egui::Color32::from_rgb(34, 34, 34),
            surface: egui::Color32::from_rgb(64, 64, 64),
            accent: egui::Color32::from_rgb(0, 150, 136),
            accent_pressed: egui::Color32::from_rgb(0, 121, 107),
            text_primary: egui::Color32::from_rgb(255, 255, 255),
            text_secondary: egui::Color32::from_rgb(153, 153, 153),
            disabled: egui::Color32::from_rgb(102, 102, 102),
            error: egui::Color32::from_rgb(239, 68, 68),
            border: egui::Color32::from_rgb(136, 136, 136),
        }
    }

    /// Apply the theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();

        // Panel colors
        style.visuals.panel_fill = self.background;
        style.visuals.window_fill = self.background;

        // Widget colors
        style.visuals.widgets.noninteractive.bg_fill = self.surface;
        style.visuals.widgets.inactive.bg_fill = self.surface;
        style.visuals.widgets.inactive.weak_bg_fill = self.surface;
        style.visuals.widgets.hovered.bg_fill = self.border;
        style.visuals.widgets.active.bg_fill = self.accent;

        // Text colors
        style.visuals.widgets.noninteractive.fg_stroke.color = self.text_primary;
        style.visuals.widgets.inactive.fg_stroke.color = self.text_primary;
        style.visuals.widgets.hovered.fg_stroke.color = self.text_primary;
        style.visuals.widgets.active.fg_stroke.color = self.text_primary;

        // Selection color
        style.visuals.selection.bg_fill = self.accent;
        style.visuals.selection.stroke.color = self.text_primary;

        // Rounded corners
        style.visuals.window_rounding = egui::Rounding::same(6.0);
        style.visuals.widgets.inactive.rounding = egui::Rounding::same(6.0);
        style.visuals.widgets.hovered.rounding = egui::Rounding::same(6.0);
        style.visuals.widgets.active.rounding = egui::Rounding::same(6.0);

        ctx.set_style(style);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Convert a profile color to egui with the given alpha.
pub fn to_color32(color: RgbColor, alpha: u8) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, alpha)
}
