//! Metric label component.
//!
//! Paints one overlay label centered in its slot.

use crate::platform::Profile;
use crate::ui::overlay::overlay_alpha;
use crate::ui::theme::to_color32;
use eframe::egui;

/// Text style for overlay labels, resolved once per paint.
pub struct MetricLabel {
    font: egui::FontId,
    color: egui::Color32,
}

impl MetricLabel {
    pub fn new(profile: &Profile) -> Self {
        Self {
            font: egui::FontId::new(profile.font_size as f32, font_family(&profile.font)),
            color: to_color32(profile.fg_color, overlay_alpha(255)),
        }
    }

    /// Paint `text` centered in `slot`.
    pub fn paint(&self, painter: &egui::Painter, slot: egui::Rect, text: &str) {
        painter.text(
            slot.center(),
            egui::Align2::CENTER_CENTER,
            text,
            self.font.clone(),
            self.color,
        );
    }
}

/// Map a profile font name onto one of egui's bundled families.
pub fn font_family(name: &str) -> egui::FontFamily {
    let name = name.to_ascii_lowercase();
    if name.contains("mono") || name.contains("courier") || name.contains("consolas") {
        egui::FontFamily::Monospace
    } else {
        egui::FontFamily::Proportional
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_family_mapping() {
        assert_eq!(font_family("Roboto"), egui::FontFamily::Proportional);
        assert_eq!(font_family("JetBrains Mono"), egui::FontFamily::Monospace);
        assert_eq!(font_family("Courier New"), egui::FontFamily::Monospace);
        assert_eq!(font_family("Consolas"), egui::FontFamily::Monospace);
        assert_eq!(font_family(""), egui::FontFamily::Proportional);
    }
}
