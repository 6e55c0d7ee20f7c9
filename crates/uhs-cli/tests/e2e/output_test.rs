//! What a run prints: usage line, text and JSON rendering, help.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]

use uhs_cli::cli::{OutputFormat, USAGE};
use uhs_cli::registry::HELP_HEADER;

use crate::common::{field, Workspace};

#[test]
fn test_success_starts_with_usage() {
    let ws = Workspace::atomizer();
    let report = ws.run(&["info"]);
    assert_eq!(report.code, 0);
    assert!(report.stdout.starts_with(&format!("{USAGE}\n")));
    assert!(report.stderr.is_empty());
}

#[test]
fn test_help_output() {
    let ws = Workspace::atomizer();
    let report = ws.run(&["help"]);
    assert_eq!(report.code, 0);

    let body = report.stdout.strip_prefix(&format!("{USAGE}\n")).unwrap();
    assert!(body.starts_with(HELP_HEADER));
    assert_eq!(field(&report, "mint"), Some("<n outputs> <output value>"));
    assert_eq!(field(&report, "fan"), Some("<count> <value> <pubkey>"));
    assert_eq!(field(&report, "sync"), Some("takes no arguments"));
    assert!(field(&report, "help").is_none());
}

#[test]
fn test_usage_error_goes_to_stderr() {
    let ws = Workspace::atomizer();
    let report = ws.run(&["send", "-h"]);
    assert_eq!(report.code, 0);
    assert!(report.stdout.is_empty());
    assert_eq!(report.stderr, "<value> <pubkey>\n");
}

#[test]
fn test_json_output() {
    let ws = Workspace::twophase();
    let files = ws.files();
    files.run(&["mint", "3", "125"], OutputFormat::Json);

    let report = files.run(&["info"], OutputFormat::Json);
    let body = report.stdout.strip_prefix(&format!("{USAGE}\n")).unwrap();
    let value: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(value["balance"], "$3.75");
    assert_eq!(value["UTXOs"], 3);
    assert_eq!(value["pending TXs"], 0);
}

#[test]
fn test_json_help_output() {
    let ws = Workspace::atomizer();
    let report = ws.files().run(&["help"], OutputFormat::Json);
    let body = report.stdout.strip_prefix(&format!("{USAGE}\n")).unwrap();
    let value: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(value.as_object().unwrap().len(), 8);
    assert_eq!(value["confirmtx"], "<tx_id>");
    assert_eq!(report.stderr, HELP_HEADER);
}
