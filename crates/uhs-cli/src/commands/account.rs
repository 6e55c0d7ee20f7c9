//! Wallet bookkeeping: `newaddress`, `importinput`, `confirmtx`, `info`,
//! `sync`.

use uhs_client::{encode_address, format_amount, hash_from_hex, Client, Input};
use uhs_core::{CommandOutcome, TypedValue};

use super::{
    check_usage, client_failure, count, fail, CONFIRM_TX, CONFIRM_TX_USAGE, IMPORT_INPUT,
    IMPORT_INPUT_USAGE, NEW_ADDRESS, NO_ARGS_USAGE, SYNC,
};

/// Generates a key and returns its address under `Address`.
pub fn new_address(client: &mut dyn Client, args: &[String]) -> CommandOutcome {
    if let Err(usage) = check_usage(args, 1, NO_ARGS_USAGE) {
        return usage;
    }

    let key = match client.new_address() {
        Ok(key) => key,
        Err(e) => return client_failure(NEW_ADDRESS, &e),
    };
    match encode_address(&key) {
        Ok(address) => {
            let mut outcome = CommandOutcome::success();
            outcome.set("Address", address);
            outcome
        }
        Err(e) => fail(NEW_ADDRESS, e),
    }
}

/// Imports a hex-encoded input sent by another wallet.
pub fn import_input(client: &mut dyn Client, args: &[String]) -> CommandOutcome {
    if let Err(usage) = check_usage(args, 2, IMPORT_INPUT_USAGE) {
        return usage;
    }

    let Ok(bytes) = hex::decode(args[1].trim()) else {
        return fail(IMPORT_INPUT, "Invalid input encoding");
    };
    let Some(input) = Input::from_bytes(&bytes) else {
        return fail(IMPORT_INPUT, "Invalid input");
    };

    match client.import_send_input(input) {
        Ok(()) => CommandOutcome::success(),
        Err(e) => client_failure(IMPORT_INPUT, &e),
    }
}

/// Confirms a pending transaction by id.
///
/// Payload: `Confirmed Balance` and `UTXOs` after confirmation.
pub fn confirm_tx(client: &mut dyn Client, args: &[String]) -> CommandOutcome {
    if let Err(usage) = check_usage(args, 2, CONFIRM_TX_USAGE) {
        return usage;
    }

    let Some(id) = hash_from_hex(args[1].trim()) else {
        return fail(CONFIRM_TX, "Invalid transaction id");
    };

    match client.confirm_transaction(&id) {
        Ok(true) => {
            let mut outcome = CommandOutcome::success();
            outcome.set("Confirmed Balance", format_amount(client.balance()));
            outcome.set("UTXOs", count(client.utxo_count()));
            outcome
        }
        Ok(false) => fail(CONFIRM_TX, "Unknown TXID"),
        Err(e) => client_failure(CONFIRM_TX, &e),
    }
}

/// Reports `balance`, `UTXOs` and `pending TXs`.
pub fn info(client: &mut dyn Client, args: &[String]) -> CommandOutcome {
    if let Err(usage) = check_usage(args, 1, NO_ARGS_USAGE) {
        return usage;
    }

    let mut outcome = CommandOutcome::success();
    outcome.set("balance", format_amount(client.balance()));
    outcome.set("UTXOs", TypedValue::ULong(count(client.utxo_count())));
    outcome.set("pending TXs", TypedValue::ULong(count(client.pending_tx_count())));
    outcome
}

/// Confirms pending transactions and folds in imported inputs.
pub fn sync(client: &mut dyn Client, args: &[String]) -> CommandOutcome {
    if let Err(usage) = check_usage(args, 1, NO_ARGS_USAGE) {
        return usage;
    }

    match client.sync() {
        Ok(()) => CommandOutcome::success(),
        Err(e) => client_failure(SYNC, &e),
    }
}
