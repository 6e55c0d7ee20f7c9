//! # uhs-cli
//!
//! Command dispatch for the UHS wallet client.
//!
//! The library holds everything the `uhs-client-cli` binary runs, so tests
//! can drive it without spawning a process.
//!
//! ## Modules
//!
//! - [`registry`] - [`CommandRegistry`], name-to-handler dispatch and `help`
//! - [`commands`] - The wallet command handlers
//! - [`cli`] - Argument parsing, exit codes and the run loop
//! - [`logging`] - `tracing` subscriber setup
//!
//! ## Usage
//!
//! ```
//! use uhs_cli::CommandRegistry;
//! use uhs_client::MockClient;
//!
//! let registry = CommandRegistry::new();
//! let mut client = MockClient::default();
//! let outcome = registry.execute(&mut client, &["info".to_string()]);
//! assert!(outcome.is_success());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod commands;
pub mod logging;
pub mod registry;

pub use logging::{
    init_logging, verbosity_to_level, LogConfig, LogError, LogFormat, LogGuard, LogLevel,
};
pub use registry::{CommandRegistry, Handler};
