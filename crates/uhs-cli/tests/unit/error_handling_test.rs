//! Error handling and conversion tests.
//!
//! These tests verify that error types implement the correct traits and
//! have readable Display implementations.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::error::Error;

use uhs_cli::logging::LogError;
use uhs_client::{AddressError, ClientError};
use uhs_core::ConfigError;

/// Test that all error types implement the Error trait.
#[test]
fn test_error_trait_implementation() {
    let err = LogError::FileCreation("test".to_string());
    assert!(err.source().is_none());

    let err = ClientError::NotInitialized;
    assert!(err.source().is_none());

    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err = ClientError::from(io_err);
    assert!(err.source().is_some());

    let err = AddressError::WrongLength(3);
    assert!(err.source().is_none());

    let err = ConfigError::file_not_found("/nope.toml");
    assert!(err.source().is_none());
}

/// Test error Display implementations.
#[test]
fn test_error_display() {
    let err = LogError::InvalidConfig("bad value".to_string());
    assert!(err.to_string().contains("Invalid log configuration"));
    assert!(err.to_string().contains("bad value"));

    let err = ClientError::CorruptState {
        path: "wallet.json".to_string(),
        reason: "expected value".to_string(),
    };
    assert!(err.to_string().contains("wallet.json"));
    assert!(err.to_string().contains("expected value"));

    let err = ClientError::TooManyOutputs {
        requested: 7,
        max: 5,
    };
    assert_eq!(err.to_string(), "too many outputs: 7 (at most 5)");

    let err = AddressError::UnsupportedType(5);
    assert!(err.to_string().contains("0x05"));

    let err = ConfigError::invalid_value("logging.level", "loud");
    assert!(err.to_string().contains("logging.level"));
    assert!(err.to_string().contains("loud"));
}

/// Errors are `Send + Sync` so they can cross thread boundaries.
#[test]
fn test_errors_are_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LogError>();
    assert_send_sync::<ClientError>();
    assert_send_sync::<AddressError>();
    assert_send_sync::<ConfigError>();
}
