//! The wallet client contract.
//!
//! Commands reach the ledger only through the [`Client`] trait. The trait is
//! object safe so the command table can hold handlers taking
//! `&mut dyn Client`, and tests can swap in [`MockClient`].
//!
//! # Example Implementation
//!
//! ```ignore
//! use uhs_client::{Client, ClientError};
//!
//! struct ReadOnly;
//!
//! impl Client for ReadOnly {
//!     fn init(&mut self) -> Result<(), ClientError> { Ok(()) }
//!     fn balance(&self) -> u64 { 0 }
//!     // ...
//! }
//! ```

use crate::types::{
    tx_id, witness_commitment, ExecuteResponse, FullTx, Hash, Input, OutPoint, PubKey,
};

/// Failures reported by a client implementation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Reading or writing client state failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted state could not be decoded.
    #[error("corrupt state in {path}: {reason}")]
    CorruptState {
        /// File holding the state.
        path: String,
        /// Why it could not be decoded.
        reason: String,
    },

    /// Key generation failed.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// The client was used before [`Client::init`] succeeded.
    #[error("client is not initialized")]
    NotInitialized,

    /// A transaction would carry more outputs than a client builds.
    #[error("too many outputs: {requested} (at most {max})")]
    TooManyOutputs {
        /// Outputs asked for.
        requested: u64,
        /// The limit.
        max: u64,
    },
}

/// Result of submitting a transfer: the built transaction, if one could be
/// built, and the sentinel's response, if there was one.
pub type SendResult = (Option<FullTx>, Option<ExecuteResponse>);

/// Wallet and ledger operations used by commands.
///
/// Read-only counters are infallible; anything that touches state returns a
/// [`ClientError`] when that state cannot be read or written.
pub trait Client {
    /// Loads state and checks that the client is ready for commands.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if state cannot be loaded.
    fn init(&mut self) -> Result<(), ClientError>;

    /// Creates `n_outputs` new outputs of `value` each, paid to this wallet.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if state cannot be updated.
    fn mint(&mut self, n_outputs: u64, value: u32) -> Result<FullTx, ClientError>;

    /// Pays `value` to `payee`. Returns no transaction if the wallet cannot
    /// fund it.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if state cannot be updated.
    fn send(&mut self, value: u32, payee: &PubKey) -> Result<SendResult, ClientError>;

    /// Pays `count` outputs of `value` each to `payee`.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if state cannot be updated.
    fn fan(&mut self, count: u32, value: u32, payee: &PubKey) -> Result<SendResult, ClientError>;

    /// Generates a fresh key and returns its public half.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the key cannot be generated or stored.
    fn new_address(&mut self) -> Result<PubKey, ClientError>;

    /// Records an input received from a sender.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if state cannot be updated.
    fn import_send_input(&mut self, input: Input) -> Result<(), ClientError>;

    /// Marks a pending transaction confirmed. Returns `false` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if state cannot be updated.
    fn confirm_transaction(&mut self, tx_id: &Hash) -> Result<bool, ClientError>;

    /// Confirmed balance in cents.
    fn balance(&self) -> u64;

    /// Number of confirmed unspent outputs.
    fn utxo_count(&self) -> usize;

    /// Number of transactions awaiting confirmation.
    fn pending_tx_count(&self) -> usize;

    /// Refreshes local state.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if state cannot be updated.
    fn sync(&mut self) -> Result<(), ClientError>;
}

/// Inputs the owner of `payee` must import to spend what `tx` paid them.
#[must_use]
pub fn export_send_inputs(tx: &FullTx, payee: &PubKey) -> Vec<Input> {
    let commitment = witness_commitment(payee);
    let id = tx_id(tx);
    tx.outputs
        .iter()
        .zip(0u64..)
        .filter(|(output, _)| output.witness_program_commitment == commitment)
        .map(|(output, index)| Input {
            prevout: OutPoint { tx_id: id, index },
            prevout_data: *output,
        })
        .collect()
}

// ============================================================================
// MockClient
// ============================================================================

/// Client operation recorded by [`MockClient`].
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// `init()`
    Init,
    /// `mint(n_outputs, value)`
    Mint(u64, u32),
    /// `send(value, payee)`
    Send(u32, PubKey),
    /// `fan(count, value, payee)`
    Fan(u32, u32, PubKey),
    /// `new_address()`
    NewAddress,
    /// `import_send_input(input)`
    ImportSendInput(Input),
    /// `confirm_transaction(tx_id)`
    ConfirmTransaction(Hash),
    /// `sync()`
    Sync,
}

/// Scripted client for tests.
///
/// Records every state-changing call in [`calls`](Self::calls). Transfers
/// succeed only while [`fundable`](Self::fundable) is set, and only ids in
/// [`known_txs`](Self::known_txs) confirm.
///
/// ```ignore
/// use uhs_client::{Client, MockClient};
///
/// let mut client = MockClient::default();
/// let tx = client.mint(2, 50).expect("mock mint");
/// assert_eq!(tx.outputs.len(), 2);
/// assert_eq!(client.calls.len(), 1);
/// ```
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Clone)]
pub struct MockClient {
    /// Calls in order.
    pub calls: Vec<MockCall>,
    /// Whether transfers can be funded.
    pub fundable: bool,
    /// Response returned with every funded transfer.
    pub response: Option<ExecuteResponse>,
    /// Ids that `confirm_transaction` accepts.
    pub known_txs: Vec<Hash>,
    /// Key returned by `new_address`.
    pub next_key: PubKey,
    /// Value reported by `balance`.
    pub balance: u64,
    /// Value reported by `utxo_count`.
    pub utxo_count: usize,
    /// Value reported by `pending_tx_count`.
    pub pending_tx_count: usize,
    /// Fail every state-changing call with this message.
    pub fail_with: Option<String>,
}

#[cfg(any(test, feature = "mock"))]
impl Default for MockClient {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            fundable: true,
            response: None,
            known_txs: Vec::new(),
            next_key: [0x11; 32],
            balance: 0,
            utxo_count: 0,
            pending_tx_count: 0,
            fail_with: None,
        }
    }
}

#[cfg(any(test, feature = "mock"))]
impl MockClient {
    fn record(&mut self, call: MockCall) -> Result<(), ClientError> {
        self.calls.push(call);
        match &self.fail_with {
            Some(reason) => Err(ClientError::CorruptState {
                path: "mock".to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn transfer(&self, outputs: Vec<crate::types::Output>) -> SendResult {
        if !self.fundable {
            return (None, None);
        }
        let total = crate::types::total_value(outputs.iter().map(|o| o.value));
        let tx = FullTx {
            inputs: vec![Input {
                prevout: OutPoint {
                    tx_id: [0xee; 32],
                    index: 0,
                },
                prevout_data: crate::types::Output {
                    witness_program_commitment: witness_commitment(&self.next_key),
                    value: total,
                },
            }],
            outputs,
            witness: vec![String::new()],
        };
        (Some(tx), self.response)
    }
}

#[cfg(any(test, feature = "mock"))]
impl Client for MockClient {
    fn init(&mut self) -> Result<(), ClientError> {
        self.record(MockCall::Init)
    }

    fn mint(&mut self, n_outputs: u64, value: u32) -> Result<FullTx, ClientError> {
        self.record(MockCall::Mint(n_outputs, value))?;
        if n_outputs > crate::types::MAX_TX_OUTPUTS {
            return Err(ClientError::TooManyOutputs {
                requested: n_outputs,
                max: crate::types::MAX_TX_OUTPUTS,
            });
        }
        let commitment = witness_commitment(&self.next_key);
        Ok(FullTx {
            inputs: Vec::new(),
            outputs: (0..n_outputs)
                .map(|_| crate::types::Output {
                    witness_program_commitment: commitment,
                    value: u64::from(value),
                })
                .collect(),
            witness: Vec::new(),
        })
    }

    fn send(&mut self, value: u32, payee: &PubKey) -> Result<SendResult, ClientError> {
        self.record(MockCall::Send(value, *payee))?;
        Ok(self.transfer(vec![crate::types::Output {
            witness_program_commitment: witness_commitment(payee),
            value: u64::from(value),
        }]))
    }

    fn fan(&mut self, count: u32, value: u32, payee: &PubKey) -> Result<SendResult, ClientError> {
        self.record(MockCall::Fan(count, value, *payee))?;
        if u64::from(count) > crate::types::MAX_TX_OUTPUTS {
            return Ok((None, None));
        }
        let commitment = witness_commitment(payee);
        Ok(self.transfer(
            (0..count)
                .map(|_| crate::types::Output {
                    witness_program_commitment: commitment,
                    value: u64::from(value),
                })
                .collect(),
        ))
    }

    fn new_address(&mut self) -> Result<PubKey, ClientError> {
        self.record(MockCall::NewAddress)?;
        Ok(self.next_key)
    }

    fn import_send_input(&mut self, input: Input) -> Result<(), ClientError> {
        self.record(MockCall::ImportSendInput(input))
    }

    fn confirm_transaction(&mut self, tx_id: &Hash) -> Result<bool, ClientError> {
        self.record(MockCall::ConfirmTransaction(*tx_id))?;
        Ok(self.known_txs.contains(tx_id))
    }

    fn balance(&self) -> u64 {
        self.balance
    }

    fn utxo_count(&self) -> usize {
        self.utxo_count
    }

    fn pending_tx_count(&self) -> usize {
        self.pending_tx_count
    }

    fn sync(&mut self) -> Result<(), ClientError> {
        self.record(MockCall::Sync)
    }
}
