//! Command registry for name-based dispatch.
//!
//! [`CommandRegistry`] maps command names to handlers and routes a tokenized
//! command line to the matching one.
//!
//! # Design
//!
//! - **Built once**: [`CommandRegistry::new()`] registers every production
//!   command; dispatch only reads the table.
//! - **Testable**: [`CommandRegistry::empty()`] plus [`register`] for tables
//!   of stub handlers.
//! - **Self-describing**: the `help` entry is a marker resolved against the
//!   registry that holds it, so it always lists the final table.
//!
//! [`register`]: CommandRegistry::register
//!
//! # Example
//!
//! ```
//! use uhs_cli::registry::CommandRegistry;
//! use uhs_client::MockClient;
//! use uhs_core::Status;
//!
//! let registry = CommandRegistry::new();
//! assert!(registry.contains("mint"));
//!
//! let mut client = MockClient::default();
//! let outcome = registry.execute(&mut client, &["help".to_string()]);
//! assert_eq!(outcome.status(), Status::Help);
//! ```

use std::collections::HashMap;

use uhs_client::Client;
use uhs_core::{CommandOutcome, TypedValue};

use crate::commands;

/// Handler invoked with the full token list, command name first.
pub type Handler = Box<dyn Fn(&mut dyn Client, &[String]) -> CommandOutcome + Send + Sync>;

/// Header of the help listing.
pub const HELP_HEADER: &str = "Available commands:\n";

/// Name the help entry is registered under in production.
pub const HELP_COMMAND: &str = "help";

/// Arguments passed to every handler when building the help listing.
const HELP_ARGS: [&str; 2] = ["", "h"];

enum Entry {
    Handler(Handler),
    Help,
}

/// Table of named command handlers.
///
/// # Example
///
/// ```
/// use uhs_cli::registry::CommandRegistry;
/// use uhs_core::CommandOutcome;
///
/// let mut registry = CommandRegistry::empty();
/// registry.register("ping", |_, _| CommandOutcome::success());
/// assert_eq!(registry.names(), vec!["ping"]);
/// ```
pub struct CommandRegistry {
    entries: HashMap<String, Entry>,
}

impl CommandRegistry {
    /// Creates a registry with every production command plus `help`.
    ///
    /// ```
    /// use uhs_cli::registry::CommandRegistry;
    ///
    /// let registry = CommandRegistry::new();
    /// assert_eq!(
    ///     registry.names(),
    ///     vec![
    ///         "confirmtx",
    ///         "fan",
    ///         "help",
    ///         "importinput",
    ///         "info",
    ///         "mint",
    ///         "newaddress",
    ///         "send",
    ///         "sync",
    ///     ]
    /// );
    /// ```
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(commands::MINT, commands::mint);
        registry.register(commands::SEND, commands::send);
        registry.register(commands::FAN, commands::fan);
        registry.register(commands::NEW_ADDRESS, commands::new_address);
        registry.register(commands::IMPORT_INPUT, commands::import_input);
        registry.register(commands::CONFIRM_TX, commands::confirm_tx);
        registry.register(commands::INFO, commands::info);
        registry.register(commands::SYNC, commands::sync);
        registry.register_help(HELP_COMMAND);
        registry
    }

    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers `handler` under `name`, replacing any earlier entry.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&mut dyn Client, &[String]) -> CommandOutcome + Send + Sync + 'static,
    {
        self.entries
            .insert(name.into(), Entry::Handler(Box::new(handler)));
    }

    /// Registers the help listing under `name`, replacing any earlier entry.
    pub fn register_help(&mut self, name: impl Into<String>) {
        self.entries.insert(name.into(), Entry::Help);
    }

    /// Dispatches `tokens` to the handler named by `tokens[0]`.
    ///
    /// An empty token list or an unregistered name yields an error outcome
    /// naming the command. Otherwise the handler's outcome is returned as is.
    pub fn execute(&self, client: &mut dyn Client, tokens: &[String]) -> CommandOutcome {
        let name = tokens.first().map_or("", String::as_str);
        match self.entries.get(name) {
            Some(Entry::Handler(handler)) => {
                tracing::debug!(command = name, args = tokens.len(), "dispatching command");
                handler(client, tokens)
            }
            Some(Entry::Help) => self.help(client),
            None => {
                tracing::warn!(command = name, "unknown command");
                CommandOutcome::error(format!("Unknown command: {name}\n"))
            }
        }
    }

    fn help(&self, client: &mut dyn Client) -> CommandOutcome {
        let help_args: Vec<String> = HELP_ARGS.iter().map(ToString::to_string).collect();
        let mut outcome = CommandOutcome::help(HELP_HEADER);
        for name in self.names() {
            if let Some(Entry::Handler(handler)) = self.entries.get(name) {
                let usage = handler(client, &help_args).render();
                outcome.set(name, TypedValue::String(usage));
            }
        }
        outcome
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered entries, help included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
