//! Mint, confirm, pay and import across process-like runs.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]

use uhs_cli::cli::OutputFormat;
use uhs_client::Client;

use crate::common::{field, Workspace};

#[test]
fn test_atomizer_mint_then_confirm() {
    let ws = Workspace::atomizer();

    let report = ws.run(&["mint", "5", "100"]);
    assert_eq!(report.code, 0);
    let id = field(&report, "Transaction ID").unwrap().to_string();
    assert_eq!(id.len(), 64);

    let info = ws.run(&["info"]);
    assert_eq!(field(&info, "balance"), Some("$0.00"));
    assert_eq!(field(&info, "pending TXs"), Some("1"));

    let confirmed = ws.run(&["confirmtx", &id]);
    assert!(confirmed.stderr.is_empty(), "{}", confirmed.stderr);
    assert_eq!(field(&confirmed, "Confirmed Balance"), Some("$5.00"));
    assert_eq!(field(&confirmed, "UTXOs"), Some("5"));

    let again = ws.run(&["confirmtx", &id]);
    assert_eq!(again.stderr, "confirmtx: Unknown TXID\n");
}

#[test]
fn test_twophase_mint_is_spendable() {
    let ws = Workspace::twophase();
    ws.run(&["mint", "2", "250"]);

    let info = ws.run(&["info"]);
    assert_eq!(field(&info, "balance"), Some("$5.00"));
    assert_eq!(field(&info, "UTXOs"), Some("2"));
    assert_eq!(field(&info, "pending TXs"), Some("0"));
}

#[test]
fn test_payment_between_wallets() {
    let ws = Workspace::twophase();
    let bob = ws.sibling("bob");
    ws.run(&["mint", "1", "1000"]);

    let address_report = bob.run(&["newaddress"], OutputFormat::Text);
    let address = field(&address_report, "Address").unwrap().to_string();
    assert!(address.starts_with("usd1"));

    let sent = ws.run(&["send", "300", &address]);
    assert!(sent.stderr.is_empty(), "{}", sent.stderr);
    assert_eq!(field(&sent, "Sentinel responded"), Some("Confirmed"));

    // Text rendering puts "<index> <input>" after the key.
    let data = field(&sent, "Data for recipient importinput").unwrap();
    let input = data.strip_prefix("0 ").unwrap();
    assert_eq!(input.len(), 160);

    let imported = bob.run(&["importinput", input], OutputFormat::Text);
    assert_eq!(imported.code, 0);
    assert!(imported.stderr.is_empty());

    assert_eq!(bob.open().balance(), 0);
    bob.run(&["sync"], OutputFormat::Text);
    assert_eq!(bob.open().balance(), 300);
    assert_eq!(ws.files().open().balance(), 700);
}

#[test]
fn test_fan_out() {
    let ws = Workspace::twophase();
    let carol = ws.sibling("carol");
    ws.run(&["mint", "3", "100"]);

    let address = {
        let report = carol.run(&["newaddress"], OutputFormat::Text);
        field(&report, "Address").unwrap().to_string()
    };
    let fanned = ws.run(&["fan", "4", "50", &address]);
    assert!(fanned.stderr.is_empty(), "{}", fanned.stderr);
    assert_eq!(ws.files().open().balance(), 100);
}

#[test]
fn test_atomizer_send_pending_until_sync() {
    let ws = Workspace::atomizer();
    let id = field(&ws.run(&["mint", "1", "100"]), "Transaction ID")
        .unwrap()
        .to_string();
    ws.run(&["confirmtx", &id]);

    let sent = ws.run(&["send", "40", &uhs_client::encode_address(&[9; 32]).unwrap()]);
    assert_eq!(field(&sent, "Sentinel responded"), Some("Pending"));
    assert_eq!(ws.files().open().pending_tx_count(), 1);

    ws.run(&["sync"]);
    let client = ws.files().open();
    assert_eq!(client.pending_tx_count(), 0);
    assert_eq!(client.balance(), 60);
}

#[test]
fn test_overspend_is_rejected() {
    let ws = Workspace::twophase();
    ws.run(&["mint", "1", "10"]);
    let address = uhs_client::encode_address(&[1; 32]).unwrap();

    let report = ws.run(&["send", "11", &address]);
    assert_eq!(report.stderr, "send: Could not generate valid send tx\n");
    assert!(report.stdout.is_empty());
    assert_eq!(ws.files().open().balance(), 10);
}

#[test]
fn test_huge_counts_are_refused() {
    let ws = Workspace::twophase();
    ws.run(&["mint", "1", "10"]);
    let address = uhs_client::encode_address(&[1; 32]).unwrap();

    let fanned = ws.run(&["fan", "4000000000", "1", &address]);
    assert_eq!(fanned.stderr, "fan: Could not generate valid send tx\n");

    let minted = ws.run(&["mint", "100000000000", "1"]);
    assert_eq!(minted.stderr, "mint: too many outputs: 100000000000 (at most 100000)\n");

    let client = ws.files().open();
    assert_eq!(client.balance(), 10);
    assert_eq!(client.utxo_count(), 1);
}

#[test]
fn test_errors_leave_state_untouched() {
    let ws = Workspace::atomizer();
    for line in [
        &["mint"][..],
        &["mint", "x", "1"],
        &["send", "100", "not-an-address"],
        &["importinput", "not-hex"],
        &["confirmtx", "nothex"],
        &["bogus"],
    ] {
        let report = ws.run(line);
        assert!(!report.stderr.is_empty(), "{line:?}");
        assert!(report.stdout.is_empty(), "{line:?}");
    }
    let client = ws.files().open();
    assert_eq!(client.pending_tx_count(), 0);
    assert_eq!(client.utxo_count(), 0);
}
