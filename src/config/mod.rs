// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use exif_retouch::config;
//! use std::path::Path;
//!
//! let path = Path::new("settings.toml");
//! let mut config = config::load_from_path(path).unwrap_or_default();
//!
//! config.language = Some("fr".to_string());
//! config::save_to_path(&config, path).expect("Failed to save config");
//! ```

use crate::app::paths;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILE: &str = "settings.toml";

/// Sample image used when no image is given on the command line.
pub const DEFAULT_SAMPLE_IMAGE_URL: &str =
    "https://raw.githubusercontent.com/ianare/exif-samples/master/jpg/gps/DSCN0010.jpg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub sample_image_url: Option<String>,
    /// Byte order of written EXIF data; big-endian when unset.
    #[serde(default)]
    pub little_endian: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            sample_image_url: Some(DEFAULT_SAMPLE_IMAGE_URL.to_string()),
            little_endian: Some(false),
        }
    }
}

impl Config {
    /// Sample image URL, falling back to the built-in default.
    #[must_use]
    pub fn sample_image_url(&self) -> &str {
        self.sample_image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_SAMPLE_IMAGE_URL)
    }

    #[must_use]
    pub fn little_endian(&self) -> bool {
        self.little_endian.unwrap_or(false)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    paths::get_app_config_dir().map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

/// Loads a config file. Invalid TOML yields the defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            warn!(path = %path.display(), "ignoring invalid settings file: {err}");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
