//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\mp3pic\config.toml
//! - macOS: ~/Library/Application Support/mp3pic/config.toml
//! - Linux: ~/.config/mp3pic/config.toml
//!
//! A different file can be given with `--config` (or `MP3PIC_CONFIG`).
//! Every setting is optional; missing values use the defaults below.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cover::{ArtworkFormat, DEFAULT_JPEG_QUALITY, DEFAULT_TARGET_SIZE, FitOptions, Size};
use crate::error::{Error, Result, ResultExt};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Embedded artwork settings
    pub artwork: ArtworkConfig,

    /// Output file handling
    pub output: OutputConfig,
}

/// Embedded artwork settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkConfig {
    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// JPEG quality (1-100)
    pub jpeg_quality: u8,

    /// Force "jpeg" or "png"; unset follows the source image
    pub format: Option<ArtworkFormat>,
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_TARGET_SIZE.width,
            height: DEFAULT_TARGET_SIZE.height,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            format: None,
        }
    }
}

/// Output file handling
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Keep the temporary artwork file next to the output mp3
    pub keep_image: bool,

    /// Wait for Enter before exiting on errors
    pub pause_on_error: bool,
}

impl Config {
    /// Validated fit options for the compositor.
    pub fn fit_options(&self) -> Result<FitOptions> {
        let options = FitOptions {
            target_size: Size::new(self.artwork.width, self.artwork.height),
            jpeg_quality: self.artwork.jpeg_quality,
            format: self.artwork.format,
        };
        options.validate()?;
        Ok(options)
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mp3pic"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if the file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Load configuration from an explicit path
///
/// Unlike [`load`], a missing or malformed file is an error.
pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(Error::not_found(path));
    }

    let contents = std::fs::read_to_string(path)
        .with_context(format!("Failed to read config file {:?}", path))?;
    let config = toml::from_str(&contents).map_err(|e| {
        Error::config(format!("Failed to parse config file {:?}: {}", path, e))
    })?;
    tracing::debug!("Loaded config from {:?}", path);
    Ok(config)
}

// ============================================================================
// Tests
// ============================================================================
