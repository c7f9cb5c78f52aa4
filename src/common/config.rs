//! Configuration file model.
//!
//! The file is TOML. Every field has a default, so an empty file (or no file
//! at all) yields the stock setup: a 2px border and a 1/4 : 1/2 : 1/4 split for
//! monitors wider than 5000px.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const RATIO_EPSILON: f64 = 1e-6;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub settings: Settings,
    /// Default placement by window class, first match wins.
    pub rules: Vec<AppRule>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub border_width: u32,
    pub focused_border_color: Color,
    pub unfocused_border_color: Color,
    pub zones: ZoneSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            border_width: 2,
            focused_border_color: Color::rgb(0xE8, 0x9A, 0xFB),
            unfocused_border_color: Color::rgb(0xFF, 0xFF, 0xFF),
            zones: ZoneSettings::default(),
        }
    }
}

/// How physical monitors are cut into zones.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ZoneSettings {
    /// Monitors strictly wider than this are split into three zones.
    pub ultrawide_threshold: u32,
    pub left_ratio: f64,
    pub center_ratio: f64,
    pub right_ratio: f64,
}

impl Default for ZoneSettings {
    fn default() -> Self {
        ZoneSettings {
            ultrawide_threshold: 5000,
            left_ratio: 0.25,
            center_ratio: 0.50,
            right_ratio: 0.25,
        }
    }
}

impl ZoneSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ratios = [
            ("left_ratio", self.left_ratio),
            ("center_ratio", self.center_ratio),
            ("right_ratio", self.right_ratio),
        ];
        for (name, ratio) in ratios {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "zones.{name} must be in (0, 1], got {ratio}"
                )));
            }
        }
        let sum: f64 = ratios.iter().map(|(_, r)| r).sum();
        if (sum - 1.0).abs() > RATIO_EPSILON {
            return Err(ConfigError::Invalid(format!(
                "zone ratios must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AppRule {
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor: Option<usize>,
}

/// Where an [`AppRule`] sends matching windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTarget {
    Zone(usize),
    Monitor(usize),
}

impl AppRule {
    pub fn target(&self) -> Option<RuleTarget> {
        match (self.zone, self.monitor) {
            (Some(zone), None) => Some(RuleTarget::Zone(zone)),
            (None, Some(monitor)) => Some(RuleTarget::Monitor(monitor)),
            _ => None,
        }
    }

    pub fn matches(&self, class: &str) -> bool { self.class == class }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Color { r, g, b } }

    /// Packed `0xRRGGBB`, the form X11 pixel values take on TrueColor visuals.
    pub fn to_pixel(self) -> u32 { (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32 }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(self, f) }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| format!("invalid color {value:?}, expected #RRGGBB"))?;
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String { color.to_string() }
}

impl Config {
    /// `$XDG_CONFIG_HOME/zonewm/config.toml`, or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zonewm").join("config.toml"))
    }

    pub fn read(path: &Path) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Config::parse(&text)
    }

    /// Reads `path` if given, otherwise the default location if it exists,
    /// otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        if let Some(path) = path {
            return Config::read(path);
        }
        match Config::default_path() {
            Some(path) if path.exists() => Config::read(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn parse(text: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.settings.zones.validate()?;
        for (idx, rule) in self.rules.iter().enumerate() {
            if rule.target().is_none() {
                return Err(ConfigError::Invalid(format!(
                    "rule {idx} ({:?}) must set exactly one of `zone` or `monitor`",
                    rule.class
                )));
            }
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> { toml::to_string(self) }
}
