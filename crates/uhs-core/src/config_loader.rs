//! Configuration loader for the wallet client.
//!
//! The client is always started with an explicit configuration path, so a
//! missing file is an error rather than a reason to fall back to defaults.
//! `~` at the start of a path is expanded to the home directory.
//!
//! # Examples
//!
//! ```no_run
//! use uhs_core::config_loader::load_config;
//!
//! let config = load_config("~/.uhs/client.toml").expect("failed to load config");
//! println!("two-phase mode: {}", config.client.twophase_mode);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::ConfigError;

/// Reads and writes one configuration file.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a loader for `path`, expanding a leading `~`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDirectory`] if the path uses `~` and the
    /// home directory cannot be determined.
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            path: expand_path(path)?,
        })
    }

    /// Creates a loader for an already-resolved path.
    #[must_use]
    pub const fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the configuration file.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.path
    }

    /// Checks if the configuration file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileNotFound`] if the file does not exist,
    /// [`ConfigError::Io`] if it cannot be read, [`ConfigError::ParseFailed`]
    /// for invalid TOML and [`ConfigError::InvalidValue`] if validation fails.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.exists() {
            return Err(ConfigError::file_not_found(self.path.display().to_string()));
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| ConfigError::io(format!("failed to read {}", self.path.display()), e))?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_failed(format!("invalid TOML in {}: {e}", self.path.display()))
        })?;

        config.validate()?;
        tracing::debug!(path = %self.path.display(), "configuration loaded");
        Ok(config)
    }
}

/// Expands `~` in paths to the home directory.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the path starts with `~` and
/// the home directory cannot be determined.
///
/// # Examples
///
/// ```
/// use uhs_core::config_loader::expand_path;
///
/// let path = expand_path("/etc/uhs/client.toml").expect("failed to expand path");
/// assert_eq!(path.to_string_lossy(), "/etc/uhs/client.toml");
/// ```
pub fn expand_path(path: &str) -> Result<PathBuf, ConfigError> {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or_else(ConfigError::no_home_directory)?;
        Ok(home.join(rest))
    } else if path == "~" {
        dirs::home_dir().ok_or_else(ConfigError::no_home_directory)
    } else {
        Ok(PathBuf::from(path))
    }
}

/// Loads and validates the configuration at `path`.
///
/// # Errors
///
/// See [`ConfigLoader::new`] and [`ConfigLoader::load`].
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    ConfigLoader::new(path)?.load()
}
