//! # Logging Infrastructure
//!
//! Structured diagnostics with `tracing`.
//!
//! Command results go to stdout, so every log layer writes to **stderr**,
//! plus an optional daily-rolling file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use uhs_cli::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::default();
//! let _guard = init_logging(&config).expect("Failed to initialize logging");
//!
//! tracing::warn!("only warnings and errors by default");
//! ```
//!
//! ## From Configuration
//!
//! ```
//! use uhs_cli::logging::{LogConfig, LogFormat, LogLevel};
//! use uhs_core::Config;
//!
//! let settings = Config::builder().log_level("error").log_format("json").build();
//! let config = LogConfig::from_settings(&settings.logging, 2).expect("valid settings");
//! assert_eq!(config.level, LogLevel::Debug);
//! assert_eq!(config.format, LogFormat::Json);
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use uhs_core::{expand_path, LoggingConfig};

/// Error type for logging initialization failures.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Failed to create log file or directory
    #[error("Failed to create log file: {0}")]
    FileCreation(String),
    /// Failed to initialize the subscriber
    #[error("Failed to initialize logging: {0}")]
    SubscriberInit(String),
    /// Invalid configuration
    #[error("Invalid log configuration: {0}")]
    InvalidConfig(String),
}

/// Log level configuration.
///
/// Variants are ordered from most to least verbose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Most verbose: trace, debug, info, warn, error
    Trace,
    /// Verbose: debug, info, warn, error
    Debug,
    /// Standard: info, warn, error
    Info,
    /// Quiet: warn, error
    #[default]
    Warn,
    /// Quietest: error only
    Error,
}

impl LogLevel {
    /// Get the string representation for env filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// This level, made more verbose by `verbosity` `-v` flags.
    ///
    /// Flags never make logging quieter than configured.
    #[must_use]
    pub fn raised_by(self, verbosity: u8) -> Self {
        if verbosity == 0 {
            self
        } else {
            self.min(verbosity_to_level(verbosity))
        }
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(LogError::InvalidConfig(format!("unknown level '{other}'"))),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Log output format configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line format (default).
    #[default]
    Pretty,
    /// JSON structured format.
    Json,
    /// Compact single-line format.
    Compact,
}

impl FromStr for LogFormat {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            other => Err(LogError::InvalidConfig(format!("unknown format '{other}'"))),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

/// Configuration for the logging system.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Minimum severity logged. Defaults to [`LogLevel::Warn`].
    pub level: LogLevel,

    /// Output format. Defaults to [`LogFormat::Pretty`].
    pub format: LogFormat,

    /// Optional file logged to in addition to stderr.
    ///
    /// The directory will be created if it doesn't exist.
    pub file_path: Option<PathBuf>,
}

impl LogConfig {
    /// Builds the logging setup from the `[logging]` section and the number
    /// of `-v` flags.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidConfig`] for an unknown level or format, or
    /// a file path whose `~` cannot be expanded.
    pub fn from_settings(settings: &LoggingConfig, verbosity: u8) -> Result<Self, LogError> {
        let level = settings.level.parse::<LogLevel>()?.raised_by(verbosity);
        let format = settings.format.parse()?;
        let file_path = settings
            .file
            .as_deref()
            .map(expand_path)
            .transpose()
            .map_err(|e| LogError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            level,
            format,
            file_path,
        })
    }
}

/// Guard that flushes logs on drop.
///
/// Keep it alive for the duration of the program so the file writer can
/// flush on shutdown.
pub struct LogGuard {
    guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

impl LogGuard {
    const fn new(guard: Option<tracing_appender::non_blocking::WorkerGuard>) -> Self {
        Self { guard }
    }
}

impl std::fmt::Debug for LogGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogGuard")
            .field("has_file_guard", &self.guard.is_some())
            .finish()
    }
}

/// Initialize the logging system.
///
/// `RUST_LOG` is ignored; the level comes from `config` only.
///
/// # Errors
///
/// Returns [`LogError`] if:
/// - The log file directory cannot be created
/// - The subscriber cannot be initialized (e.g., already initialized)
pub fn init_logging(config: &LogConfig) -> Result<LogGuard, LogError> {
    let filter = EnvFilter::try_new(config.level.as_str())
        .map_err(|e| LogError::InvalidConfig(e.to_string()))?;

    let (file_writer, guard) = if let Some(ref path) = config.file_path {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => std::path::Path::new("."),
        };
        std::fs::create_dir_all(dir)
            .map_err(|e| LogError::FileCreation(format!("{}: {}", dir.display(), e)))?;

        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| LogError::InvalidConfig("Invalid log file name".to_string()))?;

        let file_appender = tracing_appender::rolling::daily(dir, filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        (Some(non_blocking), Some(guard))
    } else {
        (None, None)
    };

    match config.format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE);
            let file_layer = file_writer.map(|writer| {
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true)
            });

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| LogError::SubscriberInit(e.to_string()))?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_current_span(true);
            let file_layer =
                file_writer.map(|writer| fmt::layer().json().with_writer(writer).with_target(true));

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| LogError::SubscriberInit(e.to_string()))?;
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(true);
            let file_layer = file_writer.map(|writer| {
                fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true)
            });

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| LogError::SubscriberInit(e.to_string()))?;
        }
    }

    Ok(LogGuard::new(guard))
}

/// Map `-v` count to a log level.
///
/// ```
/// use uhs_cli::logging::{verbosity_to_level, LogLevel};
///
/// assert_eq!(verbosity_to_level(0), LogLevel::Warn);
/// assert_eq!(verbosity_to_level(1), LogLevel::Info);
/// assert_eq!(verbosity_to_level(2), LogLevel::Debug);
/// assert_eq!(verbosity_to_level(3), LogLevel::Trace);
/// ```
#[must_use]
pub const fn verbosity_to_level(verbosity: u8) -> LogLevel {
    match verbosity {
        0 => LogLevel::Warn,
        1 => LogLevel::Info,
        2 => LogLevel::Debug,
        _ => LogLevel::Trace,
    }
}
