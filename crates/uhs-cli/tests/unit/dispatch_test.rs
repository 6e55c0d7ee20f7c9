//! Dispatch properties of the production registry.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]

use proptest::prelude::*;
use uhs_cli::commands::{self, HELP_TOKENS};
use uhs_cli::registry::HELP_HEADER;
use uhs_cli::CommandRegistry;
use uhs_client::{encode_address, MockCall, MockClient, MAX_TX_OUTPUTS};
use uhs_core::{Status, TypedValue, ValueType};

use crate::common::{command_name, numeric_arg, tokens, PRODUCTION_COMMANDS};

#[test]
fn test_production_names() {
    let registry = CommandRegistry::new();
    assert_eq!(registry.names(), PRODUCTION_COMMANDS);
}

#[test]
fn test_execute_matches_direct_handler_call() {
    let registry = CommandRegistry::new();
    let address = encode_address(&[3; 32]).unwrap();
    let cases: Vec<Vec<String>> = vec![
        tokens(&["mint", "2", "7"]),
        tokens(&["send", "9", &address]),
        tokens(&["fan", "2", "9", &address]),
        tokens(&["newaddress"]),
        tokens(&["info"]),
        tokens(&["sync"]),
        tokens(&["confirmtx", &"00".repeat(32)]),
        tokens(&["importinput", "zz"]),
    ];
    let handlers: [fn(&mut dyn uhs_client::Client, &[String]) -> uhs_core::CommandOutcome; 8] = [
        commands::mint,
        commands::send,
        commands::fan,
        commands::new_address,
        commands::info,
        commands::sync,
        commands::confirm_tx,
        commands::import_input,
    ];

    for (line, handler) in cases.iter().zip(handlers) {
        let mut via_registry = MockClient::default();
        let mut direct = MockClient::default();
        let a = registry.execute(&mut via_registry, line);
        let b = handler(&mut direct, line);

        assert_eq!(a.status(), b.status(), "{line:?}");
        assert_eq!(a.err_msg(), b.err_msg(), "{line:?}");
        assert_eq!(a.code(), b.code(), "{line:?}");
        assert_eq!(a.payload(), b.payload(), "{line:?}");
        assert_eq!(via_registry.calls, direct.calls, "{line:?}");
    }
}

#[test]
fn test_help_listing() {
    let registry = CommandRegistry::new();
    let mut client = MockClient::default();
    let outcome = registry.execute(&mut client, &tokens(&["help"]));

    assert_eq!(outcome.status(), Status::Help);
    assert_eq!(outcome.err_msg(), HELP_HEADER);
    let entries = outcome.payload().as_map().unwrap();
    assert_eq!(entries.len(), PRODUCTION_COMMANDS.len() - 1);
    assert!(!entries.contains_key("help"));

    for (name, usage) in [
        ("mint", commands::MINT_USAGE),
        ("send", commands::SEND_USAGE),
        ("fan", commands::FAN_USAGE),
        ("importinput", commands::IMPORT_INPUT_USAGE),
        ("confirmtx", commands::CONFIRM_TX_USAGE),
        ("newaddress", commands::NO_ARGS_USAGE),
        ("info", commands::NO_ARGS_USAGE),
        ("sync", commands::NO_ARGS_USAGE),
    ] {
        assert_eq!(outcome.payload().type_at_key(name), ValueType::String);
        assert_eq!(outcome.get(name), Some(&TypedValue::from(usage)), "{name}");
    }
    assert!(client.calls.is_empty());
}

#[test]
fn test_help_tokens_never_reach_client() {
    let registry = CommandRegistry::new();
    for name in PRODUCTION_COMMANDS.into_iter().filter(|n| *n != "help") {
        for token in HELP_TOKENS {
            let mut client = MockClient::default();
            let outcome = registry.execute(&mut client, &tokens(&[name, token, "1", "2"]));
            assert_eq!(outcome.status(), Status::Error, "{name} {token}");
            assert!(client.calls.is_empty(), "{name} {token}");
        }
    }
}

#[test]
fn test_mint_argument_scenarios() {
    let registry = CommandRegistry::new();
    let mut client = MockClient::default();

    let outcome = registry.execute(&mut client, &tokens(&["mint", "5", "100"]));
    assert_eq!(outcome.status(), Status::Success);
    let id = outcome.get("Transaction ID").unwrap().as_str().unwrap();
    assert_eq!(id.len(), 64);
    assert_eq!(client.calls, vec![MockCall::Mint(5, 100)]);

    let mut client = MockClient::default();
    let outcome = registry.execute(&mut client, &tokens(&["mint"]));
    assert_eq!(outcome.status(), Status::Error);
    assert_eq!(outcome.err_msg(), "<n outputs> <output value>");
    assert!(client.calls.is_empty());
}

#[test]
fn test_large_counts_are_reported() {
    let registry = CommandRegistry::new();
    let address = encode_address(&[3; 32]).unwrap();

    let mut client = MockClient::default();
    let outcome = registry.execute(&mut client, &tokens(&["mint", "100000000000", "1"]));
    assert_eq!(outcome.status(), Status::Error);
    assert_eq!(outcome.err_msg(), "mint: too many outputs: 100000000000 (at most 100000)");

    let mut client = MockClient::default();
    let outcome = registry.execute(&mut client, &tokens(&["fan", "4000000000", "1", &address]));
    assert_eq!(outcome.status(), Status::Error);
    assert_eq!(outcome.err_msg(), "fan: Could not generate valid send tx");
    assert_eq!(client.calls, vec![MockCall::Fan(4_000_000_000, 1, [3; 32])]);
}

#[test]
fn test_bad_arguments() {
    let registry = CommandRegistry::new();
    let mut client = MockClient::default();

    let outcome = registry.execute(&mut client, &tokens(&["send", "100", "not-an-address"]));
    assert_eq!(outcome.err_msg(), "send: Could not decode address");

    let outcome = registry.execute(&mut client, &tokens(&["importinput", "not-hex"]));
    assert_eq!(outcome.err_msg(), "importinput: Invalid input encoding");

    assert!(client.calls.is_empty());
}

proptest! {
    #[test]
    fn prop_unknown_command_names_itself(name in command_name()) {
        let registry = CommandRegistry::new();
        let mut client = MockClient::default();
        let outcome = registry.execute(&mut client, &[name.clone()]);
        prop_assert_eq!(outcome.status(), Status::Error);
        prop_assert!(outcome.err_msg().contains(&name));
        prop_assert!(client.calls.is_empty());
    }

    #[test]
    fn prop_mint_never_panics(count in numeric_arg(), value in numeric_arg()) {
        let registry = CommandRegistry::new();
        let mut client = MockClient::default();
        let line = [String::from("mint"), count.clone(), value.clone()];
        let outcome = registry.execute(&mut client, &line);

        let parsed = count.parse::<u64>().ok().zip(value.parse::<u32>().ok());
        match parsed {
            Some((n, v)) if n <= MAX_TX_OUTPUTS => {
                prop_assert_eq!(outcome.status(), Status::Success);
                prop_assert_eq!(client.calls, vec![MockCall::Mint(n, v)]);
            }
            Some((n, v)) => {
                prop_assert_eq!(outcome.status(), Status::Error);
                prop_assert!(outcome.err_msg().starts_with("mint: too many outputs"));
                prop_assert_eq!(client.calls, vec![MockCall::Mint(n, v)]);
            }
            None => {
                prop_assert_eq!(outcome.status(), Status::Error);
                prop_assert!(outcome.err_msg().starts_with("mint: Invalid "));
                prop_assert!(client.calls.is_empty());
            }
        }
    }

    #[test]
    fn prop_fan_any_count_returns_outcome(count in any::<u32>(), value in 1u32..=u32::MAX) {
        let registry = CommandRegistry::new();
        let mut client = MockClient::default();
        let address = encode_address(&[3; 32]).unwrap();
        let line = vec![String::from("fan"), count.to_string(), value.to_string(), address];
        let outcome = registry.execute(&mut client, &line);

        prop_assert_eq!(client.calls, vec![MockCall::Fan(count, value, [3; 32])]);
        if u64::from(count) > MAX_TX_OUTPUTS {
            prop_assert_eq!(outcome.status(), Status::Error);
            prop_assert_eq!(outcome.err_msg(), "fan: Could not generate valid send tx");
        } else {
            prop_assert_eq!(outcome.status(), Status::Success);
        }
    }
}
