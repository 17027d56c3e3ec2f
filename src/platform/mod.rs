//! Platform module for on-disk resources.
//!
//! This module contains the profile model and its JSON store, plus tray
//! icon loading. Files are resolved relative to the executable.

pub mod icons;
pub mod profile;
pub mod store;

pub use icons::TierIcons;
pub use profile::{
    ColorParseError, MetricVisibility, Profile, RgbColor, FONT_SIZES, MAX_FONT_SIZE,
};
pub use store::{ProfileError, ProfileStore, PROFILE_FILE};

use std::path::PathBuf;

/// Directory containing the running executable, or the working directory
/// when it cannot be determined.
pub fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
