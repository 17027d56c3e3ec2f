//! Widget profile model.
//!
//! The profile is the only user configuration: which metrics are shown and
//! how the overlay labels look. It is validated once when parsed.

use crate::metrics::Metric;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Font sizes offered by the settings dialog.
pub const FONT_SIZES: [u32; 5] = [8, 10, 12, 14, 16];

/// Largest font size accepted from a profile file.
pub const MAX_FONT_SIZE: u32 = 72;

/// User profile controlling the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Profile name
    pub name: String,

    /// Which metrics are drawn, stored as `[cpu, gpu, ram]`
    pub show_values: MetricVisibility,

    /// Overlay background color
    pub bg_color: RgbColor,

    /// Label text color
    pub fg_color: RgbColor,

    /// Label font name
    pub font: String,

    /// Label font size in points
    #[serde(deserialize_with = "deserialize_font_size")]
    pub font_size: u32,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            show_values: MetricVisibility::all(),
            bg_color: RgbColor::new(0x1e, 0x1e, 0x1e),
            fg_color: RgbColor::new(0xff, 0xff, 0xff),
            font: "Roboto".to_string(),
            font_size: 12,
        }
    }
}

impl Profile {
    /// Number of metrics currently enabled (0 to 3).
    pub fn enabled_count(&self) -> usize {
        self.show_values.count()
    }

    /// Enabled metrics in display order.
    pub fn enabled_metrics(&self) -> Vec<Metric> {
        self.show_values.enabled()
    }
}

fn deserialize_font_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let size = u32::deserialize(deserializer)?;
    if !(1..=MAX_FONT_SIZE).contains(&size) {
        return Err(serde::de::Error::custom(format!(
            "fontSize must be between 1 and {MAX_FONT_SIZE}"
        )));
    }
    Ok(size)
}

/// Visibility flags for CPU, GPU and RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[bool; 3]", into = "[bool; 3]")]
pub struct MetricVisibility {
    pub cpu: bool,
    pub gpu: bool,
    pub ram: bool,
}

impl MetricVisibility {
    pub fn all() -> Self {
        Self {
            cpu: true,
            gpu: true,
            ram: true,
        }
    }

    pub fn none() -> Self {
        Self {
            cpu: false,
            gpu: false,
            ram: false,
        }
    }

    pub fn is_shown(&self, metric: Metric) -> bool {
        match metric {
            Metric::Cpu => self.cpu,
            Metric::Gpu => self.gpu,
            Metric::Ram => self.ram,
        }
    }

    pub fn set(&mut self, metric: Metric, shown: bool) {
        match metric {
            Metric::Cpu => self.cpu = shown,
            Metric::Gpu => self.gpu = shown,
            Metric::Ram => self.ram = shown,
        }
    }

    pub fn count(&self) -> usize {
        Metric::ALL.iter().filter(|m| self.is_shown(**m)).count()
    }

    pub fn any(&self) -> bool {
        self.count() > 0
    }

    pub fn enabled(&self) -> Vec<Metric> {
        Metric::ALL
            .iter()
            .copied()
            .filter(|m| self.is_shown(*m))
            .collect()
    }
}

impl From<[bool; 3]> for MetricVisibility {
    fn from([cpu, gpu, ram]: [bool; 3]) -> Self {
        Self { cpu, gpu, ram }
    }
}

impl From<MetricVisibility> for [bool; 3] {
    fn from(v: MetricVisibility) -> Self {
        [v.cpu, v.gpu, v.ram]
    }
}

/// Error parsing a `#RRGGBB` color.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid color '{0}', expected #RRGGBB")]
pub struct ColorParseError(pub String);

/// Opaque RGB color, persisted as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for RgbColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for RgbColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RgbColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = Profile::default();
        assert_eq!(profile.name, "default");
        assert_eq!(profile.show_values, MetricVisibility::all());
        assert_eq!(profile.bg_color.to_string(), "#1e1e1e");
        assert_eq!(profile.fg_color.to_string(), "#ffffff");
        assert_eq!(profile.font, "Roboto");
        assert_eq!(profile.font_size, 12);
        assert_eq!(Profile::default(), Profile::default());
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!("#1E1e1e".parse(), Ok(RgbColor::new(0x1e, 0x1e, 0x1e)));
        assert!("1e1e1e".parse::<RgbColor>().is_err());
        assert!("#1e1e1".parse::<RgbColor>().is_err());
        assert!("#gg0000".parse::<RgbColor>().is_err());
        assert!("#ééé".parse::<RgbColor>().is_err());
    }

    #[test]
    fn test_visibility_serializes_as_array() {
        let v = MetricVisibility {
            cpu: true,
            gpu: false,
            ram: true,
        };
        assert_eq!(serde_json::to_string(&v).unwrap(), "[true,false,true]");
        let back: MetricVisibility = serde_json::from_str("[false,true,false]").unwrap();
        assert_eq!(back.enabled(), vec![Metric::Gpu]);
    }

    #[test]
    fn test_visibility_requires_three_entries() {
        assert!(serde_json::from_str::<MetricVisibility>("[true,true]").is_err());
        assert!(serde_json::from_str::<MetricVisibility>("[true,true,true,true]").is_err());
    }

    #[test]
    fn test_profile_json_field_names() {
        let json = serde_json::to_value(Profile::default()).unwrap();
        assert_eq!(json["showValues"], serde_json::json!([true, true, true]));
        assert_eq!(json["bgColor"], "#1e1e1e");
        assert_eq!(json["fontSize"], 12);
    }

    #[test]
    fn test_zero_font_size_rejected() {
        let json = r##"{"name":"x","showValues":[true,true,true],"bgColor":"#000000",
            "fgColor":"#ffffff","font":"Roboto","fontSize":0}"##;
        assert!(serde_json::from_str::<Profile>(json).is_err());
    }

    #[test]
    fn test_font_size_upper_bound() {
        let profile = |size: u32| {
            format!(
                r##"{{"name":"x","showValues":[true,true,true],"bgColor":"#000000",
                "fgColor":"#ffffff","font":"Roboto","fontSize":{size}}}"##
            )
        };
        let max: Profile = serde_json::from_str(&profile(MAX_FONT_SIZE)).unwrap();
        assert_eq!(max.font_size, MAX_FONT_SIZE);
        assert!(serde_json::from_str::<Profile>(&profile(MAX_FONT_SIZE + 1)).is_err());
        assert!(serde_json::from_str::<Profile>(&profile(2000)).is_err());
    }

    #[test]
    fn test_enabled_metrics_keep_display_order() {
        let mut profile = Profile::default();
        profile.show_values.set(Metric::Gpu, false);
        assert_eq!(profile.enabled_metrics(), vec![Metric::Cpu, Metric::Ram]);
        assert_eq!(profile.enabled_count(), 2);
    }
}
