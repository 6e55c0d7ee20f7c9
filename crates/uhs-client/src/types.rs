//! Ledger data types exchanged between commands and the client.
//!
//! Transactions spend [`Input`]s (a previous output plus the location it was
//! created at) and create [`Output`]s locked to a witness commitment. The
//! commitment for a public-key address is the SHA-256 of the address type
//! byte followed by the key.
//!
//! # Input Encoding
//!
//! An input crosses the command line as 160 hex characters: the 80-byte
//! little-endian layout `tx_id (32) | index (8) | commitment (32) | value (8)`.
//!
//! ```
//! use uhs_client::types::{Input, OutPoint, Output};
//!
//! let input = Input {
//!     prevout: OutPoint { tx_id: [1u8; 32], index: 0 },
//!     prevout_data: Output { witness_program_commitment: [2u8; 32], value: 100 },
//! };
//! let hex = input.to_hex();
//! assert_eq!(hex.len(), 160);
//! assert_eq!(Input::from_bytes(&hex::decode(&hex).unwrap()), Some(input));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// 32-byte hash (transaction ids, witness commitments).
pub type Hash = [u8; 32];

/// 32-byte x-only public key.
pub type PubKey = [u8; 32];

/// Address type byte for pay-to-public-key addresses.
pub const PUBLIC_KEY_ADDRESS: u8 = 0x00;

/// Length of an encoded [`Input`].
pub const INPUT_ENCODED_LEN: usize = 80;

/// Most outputs a client will put in one transaction.
pub const MAX_TX_OUTPUTS: u64 = 100_000;

/// Location of an output: the transaction that created it and its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    /// Id of the creating transaction.
    #[serde(with = "hex_bytes")]
    pub tx_id: Hash,
    /// Position in that transaction's outputs.
    pub index: u64,
}

/// A value locked to a witness commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Output {
    /// Commitment the spender's witness must open.
    #[serde(with = "hex_bytes")]
    pub witness_program_commitment: Hash,
    /// Amount in cents.
    pub value: u64,
}

/// A spendable output together with where it lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Input {
    /// Where the output was created.
    pub prevout: OutPoint,
    /// The output being spent.
    pub prevout_data: Output,
}

impl Input {
    /// Encodes the input in its fixed 80-byte layout.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(INPUT_ENCODED_LEN);
        buf.extend_from_slice(&self.prevout.tx_id);
        buf.extend_from_slice(&self.prevout.index.to_le_bytes());
        buf.extend_from_slice(&self.prevout_data.witness_program_commitment);
        buf.extend_from_slice(&self.prevout_data.value.to_le_bytes());
        buf
    }

    /// Lowercase hex of [`to_bytes`](Self::to_bytes).
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Decodes the 80-byte layout. Returns `None` for any other length.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != INPUT_ENCODED_LEN {
            return None;
        }
        let tx_id: Hash = bytes[0..32].try_into().ok()?;
        let index = u64::from_le_bytes(bytes[32..40].try_into().ok()?);
        let commitment: Hash = bytes[40..72].try_into().ok()?;
        let value = u64::from_le_bytes(bytes[72..80].try_into().ok()?);
        Some(Self {
            prevout: OutPoint { tx_id, index },
            prevout_data: Output {
                witness_program_commitment: commitment,
                value,
            },
        })
    }
}

/// A complete transaction including witnesses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullTx {
    /// Outputs being spent.
    pub inputs: Vec<Input>,
    /// Outputs being created.
    pub outputs: Vec<Output>,
    /// One witness per input, hex encoded.
    #[serde(default)]
    pub witness: Vec<String>,
}

impl FullTx {
    /// Total value created, saturating at `u64::MAX`.
    #[must_use]
    pub fn output_value(&self) -> u64 {
        total_value(self.outputs.iter().map(|o| o.value))
    }

    /// Total value spent, saturating at `u64::MAX`.
    #[must_use]
    pub fn input_value(&self) -> u64 {
        total_value(self.inputs.iter().map(|i| i.prevout_data.value))
    }
}

/// Sums amounts without overflowing. Imported inputs carry values chosen by
/// whoever encoded them.
#[must_use]
pub fn total_value(values: impl IntoIterator<Item = u64>) -> u64 {
    values.into_iter().fold(0, u64::saturating_add)
}

/// Transaction id: SHA-256 over inputs and outputs, witnesses excluded.
#[must_use]
pub fn tx_id(tx: &FullTx) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update((tx.inputs.len() as u64).to_le_bytes());
    for input in &tx.inputs {
        hasher.update(input.to_bytes());
    }
    hasher.update((tx.outputs.len() as u64).to_le_bytes());
    for output in &tx.outputs {
        hasher.update(output.witness_program_commitment);
        hasher.update(output.value.to_le_bytes());
    }
    hasher.finalize().into()
}

/// Witness commitment for a pay-to-public-key output.
#[must_use]
pub fn witness_commitment(pubkey: &PubKey) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update([PUBLIC_KEY_ADDRESS]);
    hasher.update(pubkey);
    hasher.finalize().into()
}

/// Lowercase hex of a hash.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

/// Parses a 64-character hex hash. An optional `0x` prefix is accepted.
#[must_use]
pub fn hash_from_hex(text: &str) -> Option<Hash> {
    let text = text.strip_prefix("0x").unwrap_or(text);
    let bytes = hex::decode(text).ok()?;
    bytes.try_into().ok()
}

/// Formats an amount in cents as dollars, e.g. `$12.05`.
#[must_use]
pub fn format_amount(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Status reported by the transaction sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    /// Accepted and awaiting confirmation.
    Pending,
    /// Rejected by stateless checks.
    StaticInvalid,
    /// Rejected because an input is unknown or already spent.
    StateInvalid,
    /// Accepted and confirmed.
    Confirmed,
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::StaticInvalid => write!(f, "Static invalid"),
            Self::StateInvalid => write!(f, "State invalid"),
            Self::Confirmed => write!(f, "Confirmed"),
        }
    }
}

/// Stateless validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// The transaction spends nothing.
    NoInputs,
    /// The transaction creates nothing.
    NoOutputs,
    /// An output has zero value.
    ZeroValueOutput,
    /// The same input appears twice.
    DuplicateInput,
    /// Input and output totals differ.
    AsymmetricValues,
    /// The number of witnesses does not match the number of inputs.
    MissingWitness,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoInputs => write!(f, "transaction has no inputs"),
            Self::NoOutputs => write!(f, "transaction has no outputs"),
            Self::ZeroValueOutput => write!(f, "output has zero value"),
            Self::DuplicateInput => write!(f, "duplicate input"),
            Self::AsymmetricValues => write!(f, "input and output values differ"),
            Self::MissingWitness => write!(f, "witness count does not match inputs"),
        }
    }
}

/// Runs the stateless checks a sentinel applies to a transfer.
#[must_use]
pub fn check_transaction(tx: &FullTx) -> Option<ValidationError> {
    if tx.inputs.is_empty() {
        return Some(ValidationError::NoInputs);
    }
    if tx.outputs.is_empty() {
        return Some(ValidationError::NoOutputs);
    }
    if tx.outputs.iter().any(|o| o.value == 0) {
        return Some(ValidationError::ZeroValueOutput);
    }
    let mut seen = std::collections::HashSet::new();
    if !tx.inputs.iter().all(|i| seen.insert(i.prevout)) {
        return Some(ValidationError::DuplicateInput);
    }
    if tx.input_value() != tx.output_value() {
        return Some(ValidationError::AsymmetricValues);
    }
    if tx.witness.len() != tx.inputs.len() {
        return Some(ValidationError::MissingWitness);
    }
    None
}

/// Sentinel response to a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteResponse {
    /// Outcome of submission.
    pub tx_status: TxStatus,
    /// Why the transaction was rejected, if it was.
    pub tx_error: Option<ValidationError>,
}

pub(crate) mod hex_bytes {
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;

        if bytes.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }

        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(arr)
    }
}
