//! # Test Utilities
//!
//! - [`tokens`] - Build a token list from string literals
//! - [`Workspace`] - Temporary config, client and wallet files
//!
//! ## Proptest Strategies
//!
//! - [`command_name`] - Lowercase words that are not production commands
//! - [`numeric_arg`] - Decimal strings, valid or not

#![allow(dead_code)]
#![allow(clippy::expect_used)]

use std::path::PathBuf;

use proptest::prelude::*;
use tempfile::TempDir;
use uhs_cli::cli::{dispatch, open_client, OutputFormat, Report};
use uhs_cli::CommandRegistry;
use uhs_client::WalletClient;
use uhs_core::{load_config, Config};

/// Names registered by [`CommandRegistry::new`].
pub const PRODUCTION_COMMANDS: [&str; 9] = [
    "confirmtx",
    "fan",
    "help",
    "importinput",
    "info",
    "mint",
    "newaddress",
    "send",
    "sync",
];

/// Owned tokens from string literals.
pub fn tokens(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// A config file plus client and wallet files in a temporary directory.
pub struct Workspace {
    dir: TempDir,
    name: String,
}

impl Workspace {
    /// Atomizer-mode workspace.
    pub fn atomizer() -> Self {
        Self::with_config(&Config::default())
    }

    /// Two-phase workspace.
    pub fn twophase() -> Self {
        Self::with_config(&Config::builder().twophase_mode(true).build())
    }

    /// Workspace whose config file is `config` serialized to TOML.
    pub fn with_config(config: &Config) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let toml = toml::to_string(config).expect("serialize config");
        std::fs::write(dir.path().join("client.toml"), toml).expect("write config");
        Self {
            dir,
            name: "main".to_string(),
        }
    }

    /// A second wallet sharing this workspace's directory and config.
    pub fn sibling(&self, name: &str) -> WalletFiles {
        WalletFiles {
            config: self.config_path(),
            client: self.dir.path().join(format!("{name}-client.json")),
            wallet: self.dir.path().join(format!("{name}-wallet.json")),
        }
    }

    /// The primary wallet's files.
    pub fn files(&self) -> WalletFiles {
        self.sibling(&self.name)
    }

    /// Path of the config file.
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("client.toml")
    }

    /// Runs `command` against the primary wallet.
    pub fn run(&self, command: &[&str]) -> Report {
        self.files().run(command, OutputFormat::Text)
    }
}

/// Files of one wallet.
pub struct WalletFiles {
    /// Config file.
    pub config: PathBuf,
    /// Client state file.
    pub client: PathBuf,
    /// Wallet file.
    pub wallet: PathBuf,
}

impl WalletFiles {
    /// Opens the wallet the way the binary does.
    pub fn open(&self) -> WalletClient {
        let config = load_config(self.config.to_str().expect("utf-8 path")).expect("load config");
        open_client(&config, &self.client, &self.wallet).expect("open client")
    }

    /// Runs one command line in a fresh client, as one process would.
    pub fn run(&self, command: &[&str], format: OutputFormat) -> Report {
        let mut client = self.open();
        dispatch(&CommandRegistry::new(), &mut client, &tokens(command), format)
    }
}

/// Value following `key ` on its own line of a text report.
pub fn field<'a>(report: &'a Report, key: &str) -> Option<&'a str> {
    report
        .stdout
        .lines()
        .find_map(|line| line.strip_prefix(key)?.strip_prefix(' '))
}

/// Lowercase words that are not production command names.
pub fn command_name() -> impl Strategy<Value = String> {
    "[a-z]{1,12}".prop_filter("must not be a production command", |name| {
        !PRODUCTION_COMMANDS.contains(&name.as_str())
    })
}

/// Small numbers, negatives, words and values too large for `u32`. Never
/// a help token.
pub fn numeric_arg() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..64).prop_map(|n| n.to_string()),
        "-[0-9]{1,6}",
        "[a-z][0-9a-z]{0,5}",
        "[1-9][0-9]{10,13}",
    ]
    .prop_filter("must not be a help token", |arg| {
        !uhs_cli::commands::HELP_TOKENS.contains(&arg.as_str())
    })
}
