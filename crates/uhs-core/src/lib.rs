//! # uhs-core
//!
//! Command result model and configuration for the UHS wallet client.
//!
//! ## Modules
//!
//! - [`value`] - [`TypedValue`], the recursive tagged value commands build
//!   their output from, and the renderers that turn it into text
//! - [`outcome`] - [`CommandOutcome`], status plus payload of one command
//! - [`config`] / [`config_loader`] - TOML configuration
//! - [`error`] - Configuration error types
//!
//! ## Example
//!
//! ```rust
//! use uhs_core::{CommandOutcome, Status, TypedValue};
//!
//! let mut outcome = CommandOutcome::success();
//! outcome.set("inputs", TypedValue::Array(vec!["00ff".into()]));
//! assert_eq!(outcome.status(), Status::Success);
//! assert_eq!(outcome.render(), "inputs 0 00ff\n");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod config_loader;
pub mod error;
pub mod outcome;
pub mod value;

pub use config::{ClientConfig, Config, ConfigBuilder, LoggingConfig};
pub use config_loader::{expand_path, load_config, ConfigLoader};
pub use error::{ConfigError, ConfigResult};
pub use outcome::{CommandOutcome, Renderer, Status};
pub use value::{render, render_json, Narrow, TypedValue, ValueType, UNKNOWN_DATA};
