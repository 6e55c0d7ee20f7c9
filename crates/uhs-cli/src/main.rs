//! # `uhs-client-cli`
//!
//! Wallet client for a UHS ledger.
//!
//! ## Usage
//!
//! ```bash
//! # Mint five outputs of 100 each
//! uhs-client-cli client.toml client.json wallet.json mint 5 100
//!
//! # Create an address and pay it
//! uhs-client-cli client.toml client.json wallet.json newaddress
//! uhs-client-cli client.toml client.json wallet.json send 30 usd1...
//!
//! # Show balances as JSON
//! uhs-client-cli --output json client.toml client.json wallet.json info
//!
//! # List commands
//! uhs-client-cli client.toml client.json wallet.json help
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::Write;

use clap::Parser;
use uhs_cli::cli::exit_codes::{
    EXIT_CLIENT_INIT_ERROR, EXIT_CONFIG_ERROR, EXIT_LOGGING_ERROR, EXIT_SUCCESS,
};
use uhs_cli::cli::{dispatch, open_client, Cli, USAGE};
use uhs_cli::logging::{init_logging, LogConfig, LogError, LogGuard};
use uhs_cli::CommandRegistry;
use uhs_core::{ConfigLoader, LoggingConfig};

/// Set up logging from the `[logging]` section, raised by `-v` flags.
///
/// # Errors
///
/// Returns [`LogError`] if the settings are invalid or the subscriber
/// cannot be installed.
fn setup_logging(settings: &LoggingConfig, verbose: u8) -> Result<LogGuard, LogError> {
    let config = LogConfig::from_settings(settings, verbose)?;
    init_logging(&config)
}

/// Main entry point for `uhs-client-cli`.
fn main() {
    let cli = Cli::parse();

    let Some(invocation) = cli.invocation() else {
        eprintln!("{USAGE}");
        std::process::exit(EXIT_SUCCESS);
    };

    let config = match ConfigLoader::with_path(invocation.config.clone()).load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config file: {e}");
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    let guard = match setup_logging(&config.logging, cli.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(EXIT_LOGGING_ERROR);
        }
    };

    let mut client = match open_client(&config, invocation.client_file, invocation.wallet_file) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "client initialization failed");
            eprintln!("failed to initialize client: {e}");
            std::process::exit(EXIT_CLIENT_INIT_ERROR);
        }
    };

    let registry = CommandRegistry::new();
    let report = dispatch(&registry, &mut client, invocation.tokens, cli.output);

    // A closed pipe must not change the exit code.
    let _ = std::io::stdout().write_all(report.stdout.as_bytes());
    let _ = std::io::stderr().write_all(report.stderr.as_bytes());

    drop(guard);
    std::process::exit(report.code);
}
