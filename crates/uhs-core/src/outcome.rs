//! The result of running one command.
//!
//! A [`CommandOutcome`] carries a [`Status`], an error message, an exit code
//! and a map-shaped [`TypedValue`] payload. The payload is turned into text
//! by a [`Renderer`] chosen when the outcome is built.
//!
//! # Example
//!
//! ```
//! use uhs_core::outcome::{CommandOutcome, Status};
//!
//! let mut outcome = CommandOutcome::success();
//! outcome.set("UTXOs", 2u64);
//! assert_eq!(outcome.status(), Status::Success);
//! assert_eq!(outcome.render(), "UTXOs 2\n");
//!
//! let failed = CommandOutcome::error("send: Could not decode address");
//! assert_eq!(failed.render(), "send: Could not decode address");
//! ```

use std::fmt;

use crate::value::{render, TypedValue};

/// Turns a payload into text.
pub type Renderer = Box<dyn Fn(&TypedValue) -> String + Send + Sync>;

/// Terminal state of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The command completed.
    Success,
    /// The command was rejected or failed; the message says why.
    Error,
    /// The payload holds help text.
    Help,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Help => write!(f, "help"),
        }
    }
}

/// Status, message, exit code and payload of a single command invocation.
pub struct CommandOutcome {
    status: Status,
    err: String,
    code: i32,
    payload: TypedValue,
    renderer: Renderer,
}

impl CommandOutcome {
    /// Outcome with the given status, no message and the default renderer.
    #[must_use]
    pub fn new(status: Status) -> Self {
        Self::with_message(status, String::new())
    }

    /// Outcome with the given status and message.
    #[must_use]
    pub fn with_message(status: Status, err: impl Into<String>) -> Self {
        Self::with_renderer(status, err, Box::new(render))
    }

    /// Outcome that renders its payload with `renderer`.
    ///
    /// ```
    /// use uhs_core::outcome::{CommandOutcome, Status};
    /// use uhs_core::value::render_json;
    ///
    /// let mut outcome = CommandOutcome::with_renderer(Status::Success, "", Box::new(render_json));
    /// outcome.set("count", 1i32);
    /// assert!(outcome.render().contains("\"count\": 1"));
    /// ```
    #[must_use]
    pub fn with_renderer(status: Status, err: impl Into<String>, renderer: Renderer) -> Self {
        Self {
            status,
            err: err.into(),
            code: 0,
            payload: TypedValue::map(),
            renderer,
        }
    }

    /// A `Success` outcome with an empty payload.
    #[must_use]
    pub fn success() -> Self {
        Self::new(Status::Success)
    }

    /// An `Error` outcome carrying `err`.
    #[must_use]
    pub fn error(err: impl Into<String>) -> Self {
        Self::with_message(Status::Error, err)
    }

    /// A `Help` outcome whose message heads the help listing.
    #[must_use]
    pub fn help(header: impl Into<String>) -> Self {
        Self::with_message(Status::Help, header)
    }

    /// Stores `value` under `key` in the payload.
    ///
    /// The payload is a map from construction, so this always succeeds.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<TypedValue>) -> bool {
        self.payload.set_key(key, value)
    }

    /// Entry of the payload under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TypedValue> {
        self.payload.as_map().and_then(|entries| entries.get(key))
    }

    /// The payload.
    #[must_use]
    pub const fn payload(&self) -> &TypedValue {
        &self.payload
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Overrides the status.
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// `true` for `Success` outcomes.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// The error message; empty if none was set.
    #[must_use]
    pub fn err_msg(&self) -> &str {
        &self.err
    }

    /// Replaces the error message.
    pub fn set_err_msg(&mut self, err: impl Into<String>) {
        self.err = err.into();
    }

    /// Process exit code; only meaningful for `Error` outcomes.
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Sets the process exit code.
    pub fn set_code(&mut self, code: i32) {
        self.code = code;
    }

    /// Replaces the renderer used by [`render`](Self::render).
    pub fn set_renderer(&mut self, renderer: Renderer) {
        self.renderer = renderer;
    }

    /// Error message followed by the rendered payload.
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = self.err.clone();
        text.push_str(&(self.renderer)(&self.payload));
        text
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandOutcome")
            .field("status", &self.status)
            .field("err", &self.err)
            .field("code", &self.code)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}
