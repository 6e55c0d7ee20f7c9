//! Process exit codes.
//!
//! Failures before dispatch use the negative codes below. After dispatch
//! the process exits with the outcome's code.

/// Successful operation, help, or an incomplete command line.
pub const EXIT_SUCCESS: i32 = 0;

/// The configuration file could not be loaded.
pub const EXIT_CONFIG_ERROR: i32 = -1;

/// The wallet client could not be initialized.
pub const EXIT_CLIENT_INIT_ERROR: i32 = -2;

/// Logging could not be initialized.
pub const EXIT_LOGGING_ERROR: i32 = -3;
