//! Configuration management for urltrim.
//!
//! Provides configuration loading from TOML files with support for
//! multiple file locations, environment variable overrides, and sensible defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::shortener::DEFAULT_MAX_LENGTH;

#[cfg(test)]
mod tests;

/// Environment variable naming a config file to load.
pub const CONFIG_ENV_VAR: &str = "URLTRIM_CONFIG";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file '{path}': {source}")]
    IoError {
        /// Path to the configuration file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the configuration file as TOML.
    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        /// Path to the configuration file that could not be parsed.
        path: PathBuf,
        /// The underlying TOML parse error.
        source: toml::de::Error,
    },

    /// A field parsed but holds a value the shortener cannot use.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Application configuration loaded from TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Maximum displayed length of a shortened URL, in characters.
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Log level and line format, plus an optional rolling file sink.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level: "trace", "debug", "info", "warn" or "error".
    #[serde(default = "default_level")]
    pub level: String,

    /// Include the logger name (tracing target) in each line.
    #[serde(default)]
    pub show_target: bool,

    /// Also write logs to rotating files. Stdout only when absent.
    #[serde(default)]
    pub file: Option<FileLogConfig>,
}

/// Rolling log file settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileLogConfig {
    /// Directory the log files are written to.
    #[serde(default = "default_log_directory")]
    pub directory: String,

    /// Number of rotated files to keep.
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    #[serde(default)]
    pub rotation: Rotation,
}

/// How often the log file rolls over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    Daily,
    Hourly,
    Never,
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_max_files() -> usize {
    7
}

impl Config {
    /// Load configuration from file system.
    ///
    /// Priority order:
    /// 1. `explicit` path (e.g. from a `--config` flag)
    /// 2. URLTRIM_CONFIG environment variable
    /// 3. ./urltrim.toml (local directory)
    /// 4. ~/.config/urltrim/config.toml (user config)
    ///
    /// Returns default config if no config file found. An explicit path is
    /// always read, so a missing file there is an error rather than a fallback.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if a chosen file cannot be read.
    /// Returns [`ConfigError::ParseError`] if a chosen file is not valid TOML.
    /// Returns [`ConfigError::InvalidValue`] if a chosen file fails validation.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                return Self::load_from(p);
            }
        }

        let local = PathBuf::from("urltrim.toml");
        if local.exists() {
            return Self::load_from(local);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".config/urltrim/config.toml");
            if user_config.exists() {
                return Self::load_from(user_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    ///
    /// Reads the file at the given path, parses it as TOML and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be read.
    /// Returns [`ConfigError::ParseError`] if the file is not valid TOML.
    /// Returns [`ConfigError::InvalidValue`] if validation fails.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Reject values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when `max_length` is zero or
    /// `logging.level` is not a known level name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_length",
                reason: "must be at least 1".to_string(),
            });
        }
        self.logging
            .level
            .parse::<tracing::Level>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "logging.level",
                reason: format!("'{}': {}", self.logging.level, e),
            })?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            show_target: false,
            file: None,
        }
    }
}

impl Default for FileLogConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            max_files: default_max_files(),
            rotation: Rotation::default(),
        }
    }
}
