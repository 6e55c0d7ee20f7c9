//! Configuration types for the wallet client.
//!
//! Configuration is a TOML file whose path is the first positional argument
//! of the command-line client. Every section and field is optional.
//!
//! # Default TOML Output
//!
//! ```toml
//! [client]
//! twophase_mode = false
//!
//! [logging]
//! level = "warn"
//! format = "pretty"
//! # file = "~/.uhs/client.log"
//! ```
//!
//! # Examples
//!
//! ```
//! use uhs_core::config::Config;
//!
//! let config: Config = toml::from_str("[client]\ntwophase_mode = true\n").expect("valid TOML");
//! assert!(config.client.twophase_mode);
//! assert_eq!(config.logging.level, "warn");
//! config.validate().expect("valid config");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Log levels accepted in `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Log formats accepted in `logging.format`.
pub const LOG_FORMATS: [&str; 3] = ["pretty", "json", "compact"];

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Client behaviour.
    #[serde(default)]
    pub client: ClientConfig,

    /// Diagnostic logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Client behaviour settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Use the two-phase commit client instead of the atomizer client.
    ///
    /// A two-phase client treats a transaction as confirmed as soon as it is
    /// accepted; an atomizer client keeps it pending until `confirmtx` or
    /// `sync`.
    #[serde(default)]
    pub twophase_mode: bool,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

/// Diagnostic logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Minimum level: trace, debug, info, warn or error.
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format: pretty, json or compact.
    #[serde(default = "default_format")]
    pub format: String,

    /// Optional log file (daily rolling). `~` is expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            file: None,
        }
    }
}

impl Config {
    /// Returns a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Checks values that deserialization alone cannot reject.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unknown log level or
    /// format, or an empty log file path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                &self.logging.level,
            ));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.format",
                &self.logging.format,
            ));
        }
        if matches!(self.logging.file.as_deref(), Some(path) if path.trim().is_empty()) {
            return Err(ConfigError::invalid_value("logging.file", ""));
        }
        Ok(())
    }
}

/// Builder for [`Config`].
///
/// ```
/// use uhs_core::config::Config;
///
/// let config = Config::builder().twophase_mode(true).log_level("debug").build();
/// assert!(config.client.twophase_mode);
/// assert_eq!(config.logging.level, "debug");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Sets `client.twophase_mode`.
    #[must_use]
    pub const fn twophase_mode(mut self, enabled: bool) -> Self {
        self.config.client.twophase_mode = enabled;
        self
    }

    /// Sets `logging.level`.
    #[must_use]
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Sets `logging.format`.
    #[must_use]
    pub fn log_format(mut self, format: impl Into<String>) -> Self {
        self.config.logging.format = format.into();
        self
    }

    /// Sets `logging.file`.
    #[must_use]
    pub fn log_file(mut self, file: impl Into<String>) -> Self {
        self.config.logging.file = Some(file.into());
        self
    }

    /// Finishes the configuration.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}
