//! # uhs-client
//!
//! Wallet client for the UHS ledger: the [`Client`] contract commands are
//! written against, and [`WalletClient`], a file-backed implementation.
//!
//! ## Modules
//!
//! - [`client`] - The [`Client`] trait, [`ClientError`] and, with the `mock`
//!   feature, [`MockClient`]
//! - [`wallet`] - [`WalletClient`] persisting keys, outputs and pending
//!   transactions as JSON
//! - [`types`] - Transactions, outputs, inputs and their hex encodings
//! - [`address`] - Bech32 wallet addresses
//!
//! ## Example
//!
//! ```rust
//! use uhs_client::{decode_address, encode_address, format_amount};
//!
//! let address = encode_address(&[9u8; 32]).expect("encodable");
//! assert_eq!(decode_address(&address).expect("decodable"), [9u8; 32]);
//! assert_eq!(format_amount(1234), "$12.34");
//! ```
//!
//! ## Features
//!
//! - `mock` - Enables [`MockClient`] for downstream tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod address;
pub mod client;
pub mod types;
pub mod wallet;

pub use address::{decode_address, encode_address, AddressError, BECH32_HRP};
pub use client::{export_send_inputs, Client, ClientError, SendResult};
pub use types::{
    format_amount, hash_from_hex, hash_to_hex, total_value, tx_id, ExecuteResponse, FullTx, Hash,
    Input, OutPoint, Output, PubKey, TxStatus, ValidationError, MAX_TX_OUTPUTS,
};
pub use wallet::{ClientMode, WalletClient};

#[cfg(any(test, feature = "mock"))]
pub use client::{MockCall, MockClient};
