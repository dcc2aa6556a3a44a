// SPDX-License-Identifier: MPL-2.0
//! This module handles the component configuration, loading and saving
//! preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use geofix::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Shorten the permission dwell
//! config.acquisition.requesting_dwell_ms = 500;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::diagnostics::BufferCapacity;
use crate::domain::location::{AcquisitionSettings, Dwell, PositionOptions, StageTimings};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "GeoFix";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "GEOFIX_CONFIG_DIR";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub acquisition: AcquisitionConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// `[acquisition]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    pub requesting_dwell_ms: u64,
    pub processing_dwell_ms: u64,
    pub success_reset_ms: u64,
    pub high_accuracy: bool,
    pub timeout_ms: u64,
    pub maximum_age_ms: u64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            requesting_dwell_ms: DEFAULT_REQUESTING_DWELL_MS,
            processing_dwell_ms: DEFAULT_PROCESSING_DWELL_MS,
            success_reset_ms: DEFAULT_SUCCESS_RESET_MS,
            high_accuracy: DEFAULT_HIGH_ACCURACY,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            maximum_age_ms: DEFAULT_MAXIMUM_AGE_MS,
        }
    }
}

impl AcquisitionConfig {
    /// Converts to validated component settings. Dwells are clamped.
    #[must_use]
    pub fn settings(&self) -> AcquisitionSettings {
        AcquisitionSettings {
            timings: StageTimings {
                requesting: Dwell::from_millis(self.requesting_dwell_ms),
                processing: Dwell::from_millis(self.processing_dwell_ms),
                success_reset: Dwell::from_millis(self.success_reset_ms),
            },
            options: PositionOptions {
                high_accuracy: self.high_accuracy,
                timeout: Duration::from_millis(self.timeout_ms),
                maximum_age: Duration::from_millis(self.maximum_age_ms),
            },
        }
    }
}

/// `[diagnostics]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub buffer_capacity: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY,
        }
    }
}

impl DiagnosticsConfig {
    #[must_use]
    pub fn capacity(&self) -> BufferCapacity {
        BufferCapacity::new(self.buffer_capacity)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR).filter(|dir| !dir.is_empty()) {
        return Some(PathBuf::from(dir).join(CONFIG_FILE));
    }
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

/// Loads a config file. Content that does not parse yields the defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("ignoring invalid config {}: {err}", path.display());
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_values() {
        let mut config = Config::default();
        config.acquisition.requesting_dwell_ms = 250;
        config.acquisition.high_accuracy = false;
        config.diagnostics.buffer_capacity = 64;

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("[acquisition]\ntimeout_ms = 3000\n").expect("parse");

        assert_eq!(config.acquisition.timeout_ms, 3000);
        assert_eq!(
            config.acquisition.requesting_dwell_ms,
            DEFAULT_REQUESTING_DWELL_MS
        );
        assert_eq!(config.diagnostics, DiagnosticsConfig::default());
    }

    #[test]
    fn load_from_missing_path_is_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn settings_clamp_out_of_range_dwell() {
        let config = AcquisitionConfig {
            requesting_dwell_ms: 120_000,
            ..AcquisitionConfig::default()
        };
        let settings = config.settings();

        assert_eq!(settings.timings.requesting.millis(), MAX_DWELL_MS);
        assert_eq!(settings.options, PositionOptions::default());
    }

    #[test]
    fn default_settings_match_component_defaults() {
        assert_eq!(
            AcquisitionConfig::default().settings(),
            AcquisitionSettings::default()
        );
    }

    #[test]
    fn diagnostics_capacity_is_clamped() {
        let config = DiagnosticsConfig { buffer_capacity: 1 };
        assert_eq!(config.capacity().value(), MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    }
}
