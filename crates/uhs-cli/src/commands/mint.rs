//! `mint <n outputs> <output value>`

use uhs_client::{hash_to_hex, tx_id, Client};
use uhs_core::CommandOutcome;

use super::{check_usage, client_failure, parse_arg, MINT, MINT_USAGE};

const MIN_ARGS: usize = 3;

/// Creates `n outputs` new outputs of `output value` each.
///
/// Payload: `Transaction ID`, the hex id of the mint transaction.
pub fn mint(client: &mut dyn Client, args: &[String]) -> CommandOutcome {
    if let Err(usage) = check_usage(args, MIN_ARGS, MINT_USAGE) {
        return usage;
    }

    let n_outputs: u64 = match parse_arg(MINT, args, 1, "n outputs") {
        Ok(n) => n,
        Err(outcome) => return outcome,
    };
    let value: u32 = match parse_arg(MINT, args, 2, "output value") {
        Ok(v) => v,
        Err(outcome) => return outcome,
    };

    let tx = match client.mint(n_outputs, value) {
        Ok(tx) => tx,
        Err(e) => return client_failure(MINT, &e),
    };

    let mut outcome = CommandOutcome::success();
    outcome.set("Transaction ID", hash_to_hex(&tx_id(&tx)));
    outcome
}
