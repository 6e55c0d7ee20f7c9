//! # Command Handlers
//!
//! One free function per wallet command, each with the signature
//! `fn(&mut dyn Client, &[String]) -> CommandOutcome`. `args[0]` is the
//! command name.
//!
//! Every handler follows the same contract:
//!
//! 1. Too few arguments, or a help token in `args[1]`, returns an error
//!    outcome whose message is the usage string. The client is not touched.
//! 2. Arguments are parsed; a malformed one is an error outcome.
//! 3. The client is called and its result shaped into the payload.
//!
//! ## Commands
//!
//! - `mint <n outputs> <output value>`
//! - `send <value> <pubkey>`
//! - `fan <count> <value> <pubkey>`
//! - `newaddress`
//! - `importinput <input>`
//! - `confirmtx <tx_id>`
//! - `info`
//! - `sync`

mod account;
mod mint;
mod transfer;

use std::fmt::Display;
use std::str::FromStr;

use uhs_client::ClientError;
use uhs_core::CommandOutcome;

pub use account::{confirm_tx, import_input, info, new_address, sync};
pub use mint::mint;
pub use transfer::{fan, send};

/// `mint` command name.
pub const MINT: &str = "mint";
/// `send` command name.
pub const SEND: &str = "send";
/// `fan` command name.
pub const FAN: &str = "fan";
/// `newaddress` command name.
pub const NEW_ADDRESS: &str = "newaddress";
/// `importinput` command name.
pub const IMPORT_INPUT: &str = "importinput";
/// `confirmtx` command name.
pub const CONFIRM_TX: &str = "confirmtx";
/// `info` command name.
pub const INFO: &str = "info";
/// `sync` command name.
pub const SYNC: &str = "sync";

/// Usage of `mint`.
pub const MINT_USAGE: &str = "<n outputs> <output value>";
/// Usage of `send`.
pub const SEND_USAGE: &str = "<value> <pubkey>";
/// Usage of `fan`.
pub const FAN_USAGE: &str = "<count> <value> <pubkey>";
/// Usage of `importinput`.
pub const IMPORT_INPUT_USAGE: &str = "<input>";
/// Usage of `confirmtx`.
pub const CONFIRM_TX_USAGE: &str = "<tx_id>";
/// Usage of commands without arguments.
pub const NO_ARGS_USAGE: &str = "takes no arguments";

/// Tokens in `args[1]` that ask a command for its usage.
pub const HELP_TOKENS: [&str; 4] = ["h", "-h", "help", "--help"];

/// Whether `args[1]` is a help token.
#[must_use]
pub fn is_help(args: &[String]) -> bool {
    args.get(1)
        .is_some_and(|arg| HELP_TOKENS.contains(&arg.as_str()))
}

/// Usage error when `args` is short or asks for help.
fn check_usage(args: &[String], min_args: usize, usage: &str) -> Result<(), CommandOutcome> {
    if args.len() < min_args || is_help(args) {
        Err(CommandOutcome::error(usage))
    } else {
        Ok(())
    }
}

/// Parses `args[index]` as a number, naming `what` on failure.
fn parse_arg<T: FromStr>(
    command: &str,
    args: &[String],
    index: usize,
    what: &str,
) -> Result<T, CommandOutcome> {
    let raw = args.get(index).map_or("", String::as_str);
    raw.trim().parse().map_err(|_| {
        tracing::warn!(command, argument = what, value = raw, "malformed argument");
        CommandOutcome::error(format!("{command}: Invalid {what}: {raw}"))
    })
}

/// Error outcome for a failed client call.
fn client_failure(command: &str, err: &ClientError) -> CommandOutcome {
    tracing::warn!(command, error = %err, "client call failed");
    fail(command, err)
}

fn fail(command: &str, reason: impl Display) -> CommandOutcome {
    CommandOutcome::error(format!("{command}: {reason}"))
}

/// `usize` counters as payload values.
fn count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}
