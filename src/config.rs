//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the tide-config.toml file.
//! It selects the tide station (built-in or described inline) and controls how
//! predictions are sampled and displayed.

use crate::station::Station;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "tide-config.toml";

/// Errors raised while reading or writing the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config IO: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config format: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Station(#[from] crate::error::TideError),
}

/// Application configuration loaded from tide-config.toml
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    /// Custom station; the built-in station is used when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<Station>,
    /// Sampling and display options
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Sampling and visualization configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Time window in hours (shows -window to +window from current time)
    pub window_hours: i64,
    /// Spacing between chart samples in minutes
    pub step_minutes: i64,
    /// Show heights relative to mean sea level (true) or chart datum (false)
    pub relative_to_msl: bool,
    /// Rows in the ASCII chart
    pub chart_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            window_hours: 12,
            step_minutes: 10,
            relative_to_msl: false,
            chart_rows: 24,
        }
    }
}

impl Config {
    /// Load configuration from tide-config.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from_path(&path) {
            Ok(config) => {
                info!(station = %config.station().name, "loaded configuration");
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                info!(
                    path = %path.as_ref().display(),
                    "no config file found, using built-in station"
                );
                Self::default()
            }
            Err(e) => {
                warn!(error = %e, "unusable config file, using built-in station");
                Self::default()
            }
        }
    }

    /// Load and validate configuration, reporting every failure to the caller.
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        if let Some(station) = &config.station {
            station.validate()?;
        }
        Ok(config)
    }

    /// Station to predict for: the configured one, or the built-in default.
    pub fn station(&self) -> Station {
        self.station.clone().unwrap_or_default()
    }

    /// Save current configuration to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }
}
