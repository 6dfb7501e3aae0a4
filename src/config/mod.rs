// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use geolens::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.selected_zoom = Some(16);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.selected_zoom, Some(16));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

use crate::domain::location::Coordinate;
use crate::domain::map_view::MapSettings;
use crate::error::Result;
use defaults::{
    DEFAULT_FALLBACK_LATITUDE, DEFAULT_FALLBACK_LONGITUDE, DEFAULT_FALLBACK_ZOOM,
    DEFAULT_FLY_DURATION_MS, DEFAULT_FOCUS_ZOOM, DEFAULT_LOG_LEVEL, DEFAULT_SELECTED_ZOOM,
    MAX_FLY_DURATION_MS, MAX_ZOOM, MIN_ZOOM,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "GeoLens";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fallback_latitude: Option<f64>,
    #[serde(default)]
    pub fallback_longitude: Option<f64>,
    #[serde(default)]
    pub fallback_zoom: Option<u8>,
    #[serde(default)]
    pub focus_zoom: Option<u8>,
    #[serde(default)]
    pub selected_zoom: Option<u8>,
    #[serde(default)]
    pub fly_duration_ms: Option<u32>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fallback_latitude: Some(DEFAULT_FALLBACK_LATITUDE),
            fallback_longitude: Some(DEFAULT_FALLBACK_LONGITUDE),
            fallback_zoom: Some(DEFAULT_FALLBACK_ZOOM),
            focus_zoom: Some(DEFAULT_FOCUS_ZOOM),
            selected_zoom: Some(DEFAULT_SELECTED_ZOOM),
            fly_duration_ms: Some(DEFAULT_FLY_DURATION_MS),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

impl Config {
    /// Resolves the optional fields into validated map settings.
    ///
    /// Missing values take their defaults; zooms are clamped to the tile
    /// range, the fallback center to WGS84 bounds and the fly duration to
    /// `0..=MAX_FLY_DURATION_MS`.
    #[must_use]
    pub fn map_settings(&self) -> MapSettings {
        let zoom =
            |value: Option<u8>, default: u8| value.unwrap_or(default).clamp(MIN_ZOOM, MAX_ZOOM);
        let latitude = self
            .fallback_latitude
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_FALLBACK_LATITUDE);
        let longitude = self
            .fallback_longitude
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_FALLBACK_LONGITUDE);

        MapSettings {
            fallback_center: Coordinate::new(latitude, longitude),
            fallback_zoom: zoom(self.fallback_zoom, DEFAULT_FALLBACK_ZOOM),
            focus_zoom: zoom(self.focus_zoom, DEFAULT_FOCUS_ZOOM),
            selected_zoom: zoom(self.selected_zoom, DEFAULT_SELECTED_ZOOM),
            fly_duration_ms: self
                .fly_duration_ms
                .unwrap_or(DEFAULT_FLY_DURATION_MS)
                .min(MAX_FLY_DURATION_MS),
        }
    }

    /// Returns the configured log level, or the default.
    #[must_use]
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
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

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings, using defaults");
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
