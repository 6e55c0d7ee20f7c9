//! `send` and `fan`: transfers to a bech32 address.

use uhs_client::{
    decode_address, export_send_inputs, hash_to_hex, tx_id, Client, ExecuteResponse, FullTx,
    PubKey, SendResult,
};
use uhs_core::{CommandOutcome, TypedValue};

use super::{check_usage, client_failure, fail, parse_arg, FAN, FAN_USAGE, SEND, SEND_USAGE};

const SEND_MIN_ARGS: usize = 3;
const FAN_MIN_ARGS: usize = 4;

/// Sends `value` to the address `pubkey`.
///
/// Payload: see [`fan`].
pub fn send(client: &mut dyn Client, args: &[String]) -> CommandOutcome {
    if let Err(usage) = check_usage(args, SEND_MIN_ARGS, SEND_USAGE) {
        return usage;
    }

    let value: u32 = match parse_arg(SEND, args, 1, "value") {
        Ok(v) => v,
        Err(outcome) => return outcome,
    };
    let payee = match payee(SEND, &args[2]) {
        Ok(key) => key,
        Err(outcome) => return outcome,
    };

    submitted(SEND, client.send(value, &payee), &payee)
}

/// Sends `count` outputs of `value` each to the address `pubkey`.
///
/// Payload:
/// - `tx_id`: hex id of the transfer
/// - `Data for recipient importinput`: hex inputs the payee must import
/// - `Sentinel responded`: the sentinel's status, when it answered
///
/// A validation error in the response is reported as the outcome's message
/// while the status stays `Success`.
pub fn fan(client: &mut dyn Client, args: &[String]) -> CommandOutcome {
    if let Err(usage) = check_usage(args, FAN_MIN_ARGS, FAN_USAGE) {
        return usage;
    }

    let count: u32 = match parse_arg(FAN, args, 1, "count") {
        Ok(c) => c,
        Err(outcome) => return outcome,
    };
    let value: u32 = match parse_arg(FAN, args, 2, "value") {
        Ok(v) => v,
        Err(outcome) => return outcome,
    };
    let payee = match payee(FAN, &args[3]) {
        Ok(key) => key,
        Err(outcome) => return outcome,
    };

    submitted(FAN, client.fan(count, value, &payee), &payee)
}

fn payee(command: &str, address: &str) -> Result<PubKey, CommandOutcome> {
    decode_address(address).map_err(|e| {
        tracing::warn!(command, address, error = %e, "address rejected");
        fail(command, "Could not decode address")
    })
}

fn submitted(
    command: &str,
    result: Result<SendResult, uhs_client::ClientError>,
    payee: &PubKey,
) -> CommandOutcome {
    match result {
        Ok((Some(tx), response)) => tx_result(&tx, response.as_ref(), payee),
        Ok((None, _)) => fail(command, "Could not generate valid send tx"),
        Err(e) => client_failure(command, &e),
    }
}

fn tx_result(tx: &FullTx, response: Option<&ExecuteResponse>, payee: &PubKey) -> CommandOutcome {
    let mut outcome = CommandOutcome::success();
    outcome.set("tx_id", hash_to_hex(&tx_id(tx)));

    let inputs: Vec<TypedValue> = export_send_inputs(tx, payee)
        .iter()
        .map(|input| TypedValue::String(input.to_hex()))
        .collect();
    outcome.set("Data for recipient importinput", inputs);

    if let Some(response) = response {
        outcome.set("Sentinel responded", response.tx_status.to_string());
        if let Some(error) = response.tx_error {
            outcome.set_err_msg(format!("Validation error: {error}"));
        }
    }
    outcome
}
