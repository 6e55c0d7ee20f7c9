//! # CLI Module
//!
//! Process-level surface of `uhs-client-cli`.
//!
//! ## Module Structure
//!
//! - [`args`] - Argument parsing with clap
//! - [`exit_codes`] - Exit codes for failures before dispatch
//! - [`session`] - Opening the client, dispatching, shaping output
//!
//! ## Usage
//!
//! ```no_run
//! use clap::Parser;
//! use uhs_cli::cli::Cli;
//!
//! let cli = Cli::parse();
//! if let Some(invocation) = cli.invocation() {
//!     println!("running {:?}", invocation.tokens);
//! }
//! ```

pub mod args;
pub mod exit_codes;
pub mod session;

pub use args::{Cli, Invocation, OutputFormat, USAGE};
pub use session::{dispatch, open_client, Report};
