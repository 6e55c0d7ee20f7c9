//! End-to-end command flows against file-backed wallets.
//!
//! Each `run` opens a fresh client on the same files, so state only carries
//! over through what the wallet persisted.

pub mod output_test;
pub mod wallet_flow_test;
