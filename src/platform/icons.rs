//! Icon generation and loading utilities.
//!
//! Loads the per-tier tray icons from `assets/` and generates a tinted
//! circle for any tier whose asset is missing or unreadable.

use crate::ui::{TrayError, TrayTier};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tray_icon::Icon;

/// Generated icon size in pixels.
pub const ICON_SIZE: u32 = 32;

/// One tray icon per CPU tier.
#[derive(Clone)]
pub struct TierIcons {
    low: Icon,
    medium: Icon,
    high: Icon,
}

impl TierIcons {
    /// Load the three tier icons from `asset_dir`, falling back to
    /// generated icons.
    pub fn load(asset_dir: &Path) -> Result<Self, TrayError> {
        Ok(Self {
            low: load_or_generate(asset_dir, TrayTier::Low)?,
            medium: load_or_generate(asset_dir, TrayTier::Medium)?,
            high: load_or_generate(asset_dir, TrayTier::High)?,
        })
    }

    /// Icons from the `assets` directory beside the executable.
    pub fn from_default_assets() -> Result<Self, TrayError> {
        Self::load(&super::executable_dir().join("assets"))
    }

    pub fn get(&self, tier: TrayTier) -> &Icon {
        match tier {
            TrayTier::Low => &self.low,
            TrayTier::Medium => &self.medium,
            TrayTier::High => &self.high,
        }
    }
}

/// Asset path for a tier, e.g. `assets/logo-high.ico`.
pub fn asset_path(asset_dir: &Path, tier: TrayTier) -> PathBuf {
    asset_dir.join(format!("logo-{}.ico", tier.as_str()))
}

fn load_or_generate(asset_dir: &Path, tier: TrayTier) -> Result<Icon, TrayError> {
    let path = asset_path(asset_dir, tier);
    match load_icon_file(&path) {
        Ok(icon) => {
            debug!(path = %path.display(), "loaded tray icon");
            Ok(icon)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "using generated tray icon");
            let rgba = generate_tier_icon(tier);
            Icon::from_rgba(rgba, ICON_SIZE, ICON_SIZE)
                .map_err(|_| TrayError::IconLoadFailed)
        }
    }
}

/// Decode an image file into a tray icon.
fn load_icon_file(path: &Path) -> Result<Icon, String> {
    let image = image::open(path).map_err(|e| e.to_string())?.into_rgba8();
    let (width, height) = image.dimensions();
    Icon::from_rgba(image.into_raw(), width, height).map_err(|e| e.to_string())
}

/// Tint used for a tier's generated icon.
pub fn tier_color(tier: TrayTier) -> (u8, u8, u8) {
    match tier {
        TrayTier::Low => (16, 185, 129),
        TrayTier::Medium => (245, 158, 11),
        TrayTier::High => (239, 68, 68),
    }
}

/// Generate a tier icon as RGBA data: a filled, anti-aliased circle with
/// a white ring.
pub fn generate_tier_icon(tier: TrayTier) -> Vec<u8> {
    let size = ICON_SIZE as usize;
    let mut rgba = vec![0u8; size * size * 4];

    let center = size as f32 / 2.0;
    let radius = size as f32 / 2.0 - 2.0;
    let ring = radius * 0.55;
    let (r, g, b) = tier_color(tier);

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let dist = (dx * dx + dy * dy).sqrt();

            let alpha = if dist < radius {
                255
            } else if dist < radius + 1.0 {
                // Anti-aliased edge
                ((radius + 1.0 - dist) * 255.0) as u8
            } else {
                continue;
            };

            let white = (dist - ring).abs() < 1.5;
            let (pr, pg, pb) = if white { (255, 255, 255) } else { (r, g, b) };
            rgba[idx] = pr;
            rgba[idx + 1] = pg;
            rgba[idx + 2] = pb;
            rgba[idx + 3] = alpha;
        }
    }

    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_paths() {
        let dir = Path::new("assets");
        assert_eq!(asset_path(dir, TrayTier::Low), dir.join("logo-low.ico"));
        assert_eq!(asset_path(dir, TrayTier::Medium), dir.join("logo-medium.ico"));
        assert_eq!(asset_path(dir, TrayTier::High), dir.join("logo-high.ico"));
    }

    #[test]
    fn test_generated_icon_is_tinted_per_tier() {
        let size = ICON_SIZE as usize;
        let center = (size / 2 * size + 3) * 4;
        for tier in [TrayTier::Low, TrayTier::Medium, TrayTier::High] {
            let rgba = generate_tier_icon(tier);
            assert_eq!(rgba.len(), size * size * 4);
            let (r, g, b) = tier_color(tier);
            assert_eq!(&rgba[center..center + 4], &[r, g, b, 255]);
            // Corners stay transparent
            assert_eq!(rgba[3], 0);
        }
    }

    #[test]
    fn test_missing_assets_fall_back_to_generated() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TierIcons::load(dir.path()).is_ok());
    }
}
