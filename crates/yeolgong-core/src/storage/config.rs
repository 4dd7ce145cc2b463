//! TOML-based engine configuration.
//!
//! Holds the tunables that are not user preferences:
//! - Focus density weights, thresholds and the tier table
//! - Quick-return window for lifecycle tracking
//! - Debounce delay for persistence
//! - Maximum accepted timer duration
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{data_dir, get_json_value_by_path, set_json_value_by_path};
use crate::density::DensityConfig;
use crate::error::{ConfigError, CoreError};

/// Lifecycle tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Returning within this many seconds counts as a quick return.
    #[serde(default = "default_quick_return_secs")]
    pub quick_return_secs: u64,
}

/// Persistence behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Timer limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Longest countdown or pomodoro phase accepted at creation.
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: u64,
}

/// Engine configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub density: DensityConfig,
}

// Default functions
fn default_quick_return_secs() -> u64 {
    45
}
fn default_debounce_ms() -> u64 {
    500
}
fn default_max_duration_secs() -> u64 {
    24 * 60 * 60
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            quick_return_secs: default_quick_return_secs(),
        }
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: default_max_duration_secs(),
        }
    }
}

impl Config {
    /// Default location, `<data_dir>/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first use.
    ///
    /// # Errors
    /// Returns an error if the data directory is unusable, the file exists
    /// but cannot be parsed, or the defaults cannot be written.
    pub fn load() -> Result<Self, CoreError> {
        Ok(Self::load_from(&Self::path()?)?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// default config cannot be written to disk.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                debug!("loaded config from {}", path.display());
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), CoreError> {
        Ok(self.save_to(&Self::path()?)?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Check cross-field invariants serde cannot express.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when the density section is unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Ok(self.density.validate()?)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!("using default config: {e}");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. The change is validated
    /// by decoding the whole config again and checking its invariants;
    /// nothing is written to disk.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not fit.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
