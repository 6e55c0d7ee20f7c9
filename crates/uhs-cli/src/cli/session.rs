//! One run of the client: open the wallet, dispatch, report.
//!
//! The binary wires these steps to the real process; tests drive them with
//! temporary files or a [`MockClient`](uhs_client::MockClient).

use std::path::Path;

use uhs_client::{Client, ClientError, ClientMode, WalletClient};
use uhs_core::{render_json, CommandOutcome, Config, Status};

use super::args::{OutputFormat, USAGE};
use super::exit_codes::EXIT_SUCCESS;
use crate::registry::CommandRegistry;

/// What the process prints and the code it exits with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Exit code.
    pub code: i32,
    /// Text for stdout.
    pub stdout: String,
    /// Text for stderr.
    pub stderr: String,
}

impl Report {
    /// Shapes an outcome for the terminal.
    ///
    /// Errors print their message to stderr and carry the outcome's code.
    /// Success and help print the usage line followed by the rendered
    /// outcome. In JSON mode the outcome is rendered with [`render_json`] and
    /// any accompanying message (help header, validation note) moves to
    /// stderr so the body stays parseable.
    #[must_use]
    pub fn from_outcome(mut outcome: CommandOutcome, format: OutputFormat) -> Self {
        match outcome.status() {
            Status::Error => {
                let mut stderr = outcome.err_msg().to_string();
                if !stderr.ends_with('\n') {
                    stderr.push('\n');
                }
                Self {
                    code: outcome.code(),
                    stdout: String::new(),
                    stderr,
                }
            }
            Status::Success | Status::Help => {
                let (body, stderr) = match format {
                    OutputFormat::Text => (outcome.render(), String::new()),
                    OutputFormat::Json => {
                        let mut note = outcome.err_msg().to_string();
                        if !note.is_empty() && !note.ends_with('\n') {
                            note.push('\n');
                        }
                        outcome.set_err_msg("");
                        outcome.set_renderer(Box::new(render_json));
                        (format!("{}\n", outcome.render()), note)
                    }
                };
                Self {
                    code: EXIT_SUCCESS,
                    stdout: format!("{USAGE}\n{body}"),
                    stderr,
                }
            }
        }
    }
}

/// Builds and initializes the wallet client selected by `config`.
///
/// # Errors
///
/// Returns the [`ClientError`] from [`Client::init`].
pub fn open_client(
    config: &Config,
    client_file: &Path,
    wallet_file: &Path,
) -> Result<WalletClient, ClientError> {
    let mode = ClientMode::from_twophase(config.client.twophase_mode);
    let mut client = WalletClient::new(mode, wallet_file, client_file);
    client.init()?;
    tracing::debug!(?mode, "client ready");
    Ok(client)
}

/// Runs one command line against `client`.
pub fn dispatch(
    registry: &CommandRegistry,
    client: &mut dyn Client,
    tokens: &[String],
    format: OutputFormat,
) -> Report {
    let outcome = registry.execute(client, tokens);
    tracing::debug!(status = %outcome.status(), code = outcome.code(), "command finished");
    Report::from_outcome(outcome, format)
}
