use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;
use crate::interaction::InteractionKind;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/overlaystack/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("overlaystack").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise behaves like [`Config::load_from`].
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Surface width is a percentage between 1 and 100
    /// - Surface height is at least one row
    /// - Key dismissal has at least one key when enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.surface.width_percent) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "surface.width_percent must be between 1 and 100, got {}",
                    self.surface.width_percent
                ),
            });
        }

        if self.surface.height == 0 {
            return Err(ConfigError::ValidationError {
                message: "surface.height must be at least 1".to_string(),
            });
        }

        let key_down = self.interaction.events.contains(&InteractionKind::KeyDown);
        if key_down && self.interaction.dismiss_keys.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "interaction.dismiss_keys must not be empty when key_down is enabled"
                    .to_string(),
            });
        }

        Ok(())
    }
}
