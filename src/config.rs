//! Configuration for rendering and export.
//!
//! Supports YAML configuration with precedence: CLI > ENV > file > defaults.
//! The environment variable [`CONFIG_ENV`] names a config file; otherwise
//! `<config_dir>/trueno-dash/config.yaml` is used when it exists.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::MAX_DIMENSION;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding a config file path.
pub const CONFIG_ENV: &str = "TRUENO_DASH_CONFIG";

/// Where the rendered page goes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output HTML path; stdout when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Attach PNG download links to chart cards.
    #[serde(default = "default_download_links")]
    pub download_links: bool,
}

fn default_download_links() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            download_links: default_download_links(),
        }
    }
}

/// Chart canvas size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Chart width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Chart height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    640
}
fn default_height() -> u32 {
    400
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Page colors, as `#rrggbb` strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Accent used for headings and bar fills.
    #[serde(default = "default_accent")]
    pub accent: String,

    /// Page background.
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_accent() -> String {
    "#636efa".to_string()
}
fn default_background() -> String {
    "#ffffff".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: default_accent(),
            background: default_background(),
        }
    }
}

impl ThemeConfig {
    /// Parse the accent color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for a malformed hex string.
    pub fn accent_color(&self) -> Result<Rgba> {
        Rgba::from_hex(&self.accent)
    }

    /// Parse the background color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for a malformed hex string.
    pub fn background_color(&self) -> Result<Rgba> {
        Rgba::from_hex(&self.background)
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Chart settings.
    #[serde(default)]
    pub charts: ChartConfig,

    /// Theme colors.
    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            output: OutputConfig::default(),
            charts: ChartConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails, or if a theme
    /// color or the chart size is invalid.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let size = 1..=MAX_DIMENSION;
        if !size.contains(&self.charts.width) || !size.contains(&self.charts.height) {
            return Err(Error::InvalidDimensions {
                width: self.charts.width,
                height: self.charts.height,
            });
        }
        self.theme.accent_color()?;
        self.theme.background_color()?;
        Ok(())
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Default config file location, `<config_dir>/trueno-dash/config.yaml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("trueno-dash").join("config.yaml"))
    }

    /// Resolve the configuration to use.
    ///
    /// An explicit path (from the command line) wins, then the path in
    /// `env_path` (the [`CONFIG_ENV`] variable), then the per-user file if
    /// it exists, then defaults. Explicitly named files must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a named file is missing or any file fails to
    /// parse.
    pub fn resolve(cli_path: Option<&Path>, env_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = cli_path.or(env_path) {
            tracing::debug!(path = %path.display(), "loading configuration");
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading user configuration");
                Self::load(path)
            }
            _ => Ok(Self::default()),
        }
    }
}
