//! User settings stored as TOML in the platform config directory
//!
//! Every key is optional on disk; missing keys take their defaults.
//! A missing file is generated with defaults, a broken file is left
//! untouched and the defaults are used for the session.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{Level, error, info, warn};
use url::Url;

use crate::constants::{api, images, validation::*};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Catalog API root
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// IIIF image server root
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Requested image width in pixels
    #[serde(default = "default_image_width")]
    pub image_width: u32,

    /// Upper bound for a single catalog request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// trace, debug, info, warn or error
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_window_width")]
    pub window_width: u16,

    #[serde(default = "default_window_height")]
    pub window_height: u16,
}

fn default_api_base_url() -> String {
    api::DEFAULT_BASE_URL.to_string()
}

fn default_image_base_url() -> String {
    images::DEFAULT_BASE_URL.to_string()
}

fn default_image_width() -> u32 {
    images::DEFAULT_WIDTH
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_window_width() -> u16 {
    480
}

fn default_window_height() -> u16 {
    800
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            image_base_url: default_image_base_url(),
            image_width: default_image_width(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

/// Session-only values taken from the command line
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub log_level: Option<String>,
    pub api_base_url: Option<String>,
}

impl Settings {
    /// ~/.config/virtual-art-gallery/settings.toml (platform equivalent)
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Read and parse without logging, so it can run before the subscriber exists.
    /// `Ok(None)` when the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML from {}", path.display()))?;
        Ok(Some(settings))
    }

    /// Turn the result of `read` into usable settings, logging what happened.
    /// Generates the file when it was missing.
    pub fn resolve(path: &Path, read: Result<Option<Self>>) -> Self {
        let mut settings = match read {
            Ok(Some(settings)) => {
                info!(path = %path.display(), "Loaded settings");
                settings
            }
            Ok(None) => {
                let settings = Self::default();
                match settings.save_to(path) {
                    Ok(()) => info!(path = %path.display(), "Generated default settings file"),
                    Err(e) => warn!(error = ?e, "Failed to write default settings"),
                }
                settings
            }
            Err(e) => {
                // Don't overwrite the broken file - user needs to fix it
                error!(path = %path.display(), error = ?e, "Invalid settings file, using defaults");
                Self::default()
            }
        };
        settings.validate_and_clamp();
        settings
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        Ok(())
    }

    /// Apply command-line values (not persisted)
    pub fn apply_overrides(&mut self, overrides: &SettingsOverrides) {
        if let Some(level) = &overrides.log_level {
            self.log_level = level.clone();
        }
        if let Some(url) = &overrides.api_base_url {
            info!(api_base_url = %url, "Using catalog URL from command line");
            self.api_base_url = url.clone();
        }
    }

    /// Clamp numeric values to safe ranges and replace unusable URLs
    pub fn validate_and_clamp(&mut self) {
        if !is_http_url(&self.api_base_url) {
            warn!(api_base_url = %self.api_base_url, using = api::DEFAULT_BASE_URL, "Invalid api_base_url, using default");
            self.api_base_url = default_api_base_url();
        }

        if !is_http_url(&self.image_base_url) {
            warn!(image_base_url = %self.image_base_url, using = images::DEFAULT_BASE_URL, "Invalid image_base_url, using default");
            self.image_base_url = default_image_base_url();
        }

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            let clamped = self.request_timeout_secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS);
            warn!(request_timeout_secs = self.request_timeout_secs, using = clamped, "request_timeout_secs out of range, clamping");
            self.request_timeout_secs = clamped;
        }

        if !(MIN_IMAGE_WIDTH..=MAX_IMAGE_WIDTH).contains(&self.image_width) {
            let clamped = self.image_width.clamp(MIN_IMAGE_WIDTH, MAX_IMAGE_WIDTH);
            warn!(image_width = self.image_width, using = clamped, "image_width out of range, clamping");
            self.image_width = clamped;
        }

        for (name, value) in [("window_width", &mut self.window_width), ("window_height", &mut self.window_height)] {
            if !(MIN_WINDOW_DIMENSION..=MAX_WINDOW_DIMENSION).contains(&*value) {
                let clamped = (*value).clamp(MIN_WINDOW_DIMENSION, MAX_WINDOW_DIMENSION);
                warn!(setting = name, value = *value, using = clamped, "window dimension out of range, clamping");
                *value = clamped;
            }
        }

        if parse_level(&self.log_level).is_none() {
            warn!(log_level = %self.log_level, "Unknown log_level, using info");
            self.log_level = default_log_level();
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn level(&self) -> Level {
        parse_level(&self.log_level).unwrap_or(Level::INFO)
    }
}

/// Absolute http(s) URL with a host
fn is_http_url(value: &str) -> bool {
    Url::parse(value.trim())
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

/// Case-insensitive level name
pub fn parse_level(name: &str) -> Option<Level> {
    match name.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}
