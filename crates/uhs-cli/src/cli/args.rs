//! # CLI Argument Definitions
//!
//! ```text
//! uhs-client-cli [-v...] [--output text|json]
//!                <config file> <client file> <wallet file> <command> [args...]
//! ```
//!
//! Everything after the wallet file is handed to the command registry
//! untouched, so command arguments may start with `-` (`mint -h`).

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Usage line printed before results and when arguments are missing.
pub const USAGE: &str =
    "Usage: uhs-client-cli <config file> <client file> <wallet file> <command> <args...>";

/// Wallet client for a UHS ledger.
#[derive(Debug, Parser)]
#[command(name = "uhs-client-cli")]
#[command(author, version, about = "Wallet client for a UHS ledger")]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    ///
    /// Raises the level from the configuration file; never lowers it.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format for command results
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// TOML configuration file
    #[arg(value_name = "CONFIG FILE")]
    pub config: Option<PathBuf>,

    /// Client state file (pending transactions and imported inputs)
    #[arg(value_name = "CLIENT FILE")]
    pub client_file: Option<PathBuf>,

    /// Wallet file (keys and unspent outputs)
    #[arg(value_name = "WALLET FILE")]
    pub wallet_file: Option<PathBuf>,

    /// Command name followed by its arguments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl Cli {
    /// The three files and the command tokens, when all are present.
    #[must_use]
    pub fn invocation(&self) -> Option<Invocation<'_>> {
        match (&self.config, &self.client_file, &self.wallet_file) {
            (Some(config), Some(client_file), Some(wallet_file)) if !self.command.is_empty() => {
                Some(Invocation {
                    config,
                    client_file,
                    wallet_file,
                    tokens: &self.command,
                })
            }
            _ => None,
        }
    }
}

/// Positional arguments of a complete command line.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// Configuration file.
    pub config: &'a PathBuf,
    /// Client state file.
    pub client_file: &'a PathBuf,
    /// Wallet file.
    pub wallet_file: &'a PathBuf,
    /// Command name and arguments.
    pub tokens: &'a [String],
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `key value` lines
    #[default]
    Text,

    /// Pretty-printed JSON object
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
