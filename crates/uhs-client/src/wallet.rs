//! File-backed wallet client.
//!
//! [`WalletClient`] keeps two JSON files:
//!
//! - the **wallet file**: signing keys and confirmed unspent outputs
//! - the **client file**: transactions awaiting confirmation and inputs
//!   imported from senders
//!
//! There is no network. In [`ClientMode::Atomizer`] a submitted transaction
//! stays pending until `confirm_transaction` or `sync`; in
//! [`ClientMode::TwoPhase`] it is confirmed on submission.
//!
//! # Storage
//!
//! The wallet file holds secret keys, so both files are created with 0600
//! permissions. A save writes both files to hidden temp files next to them
//! and only renames them into place once both writes succeeded, so a failed
//! save leaves the previous pair intact.
//!
//! # Example
//!
//! ```no_run
//! use uhs_client::{Client, ClientMode, WalletClient};
//!
//! let mut client = WalletClient::new(ClientMode::TwoPhase, "wallet.json", "client.json");
//! client.init().expect("init");
//! client.mint(2, 500).expect("mint");
//! assert_eq!(client.balance(), 1000);
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use k256::schnorr::signature::Signer;
use k256::schnorr::SigningKey;
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::{Client, ClientError, SendResult};
use crate::types::{
    check_transaction, hash_to_hex, total_value, tx_id, witness_commitment, ExecuteResponse,
    FullTx, Hash, Input, OutPoint, Output, PubKey, TxStatus, MAX_TX_OUTPUTS, PUBLIC_KEY_ADDRESS,
};

/// How submitted transactions are confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientMode {
    /// Pending until explicitly confirmed or synced.
    #[default]
    Atomizer,
    /// Confirmed on submission.
    TwoPhase,
}

impl ClientMode {
    /// Mode selected by the `client.twophase_mode` setting.
    #[must_use]
    pub const fn from_twophase(twophase: bool) -> Self {
        if twophase {
            Self::TwoPhase
        } else {
            Self::Atomizer
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct KeyEntry {
    #[serde(with = "crate::types::hex_bytes")]
    secret: [u8; 32],
    #[serde(with = "crate::types::hex_bytes")]
    pubkey: PubKey,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WalletState {
    #[serde(default)]
    keys: Vec<KeyEntry>,
    #[serde(default)]
    utxos: Vec<Input>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ClientState {
    #[serde(default)]
    pending_txs: Vec<FullTx>,
    #[serde(default)]
    pending_inputs: Vec<Input>,
}

/// Wallet client persisting its state to local files.
#[derive(Debug)]
pub struct WalletClient {
    mode: ClientMode,
    wallet_path: PathBuf,
    client_path: PathBuf,
    wallet: WalletState,
    state: ClientState,
    initialized: bool,
}

impl WalletClient {
    /// Creates a client over the given files. Nothing is read until
    /// [`Client::init`].
    #[must_use]
    pub fn new(
        mode: ClientMode,
        wallet_path: impl Into<PathBuf>,
        client_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            mode,
            wallet_path: wallet_path.into(),
            client_path: client_path.into(),
            wallet: WalletState::default(),
            state: ClientState::default(),
            initialized: false,
        }
    }

    /// Confirmation mode.
    #[must_use]
    pub const fn mode(&self) -> ClientMode {
        self.mode
    }

    fn ensure_initialized(&self) -> Result<(), ClientError> {
        if self.initialized {
            Ok(())
        } else {
            Err(ClientError::NotInitialized)
        }
    }

    fn save(&self) -> Result<(), ClientError> {
        let wallet = StagedFile::write(&self.wallet_path, &self.wallet)?;
        let state = StagedFile::write(&self.client_path, &self.state)?;
        wallet.commit()?;
        state.commit()
    }

    fn generate_key(&mut self) -> Result<PubKey, ClientError> {
        let mut secret = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);
        let signing = SigningKey::from_bytes(&secret)
            .map_err(|e| ClientError::KeyGeneration(e.to_string()))?;

        let mut pubkey = [0u8; 32];
        pubkey.copy_from_slice(&signing.verifying_key().to_bytes());
        self.wallet.keys.push(KeyEntry { secret, pubkey });
        Ok(pubkey)
    }

    fn key_for(&self, commitment: &Hash) -> Option<&KeyEntry> {
        self.wallet
            .keys
            .iter()
            .find(|key| witness_commitment(&key.pubkey) == *commitment)
    }

    /// Credits every output of `tx` that one of our keys can spend.
    fn apply_confirmed(&mut self, tx: &FullTx) {
        let id = tx_id(tx);
        for (output, index) in tx.outputs.iter().zip(0u64..) {
            if self.key_for(&output.witness_program_commitment).is_some() {
                self.wallet.utxos.push(Input {
                    prevout: OutPoint { tx_id: id, index },
                    prevout_data: *output,
                });
            }
        }
    }

    fn sign(&self, tx: &FullTx) -> Vec<String> {
        let id = tx_id(tx);
        tx.inputs
            .iter()
            .map(|input| {
                let Some(key) = self.key_for(&input.prevout_data.witness_program_commitment)
                else {
                    return String::new();
                };
                let Ok(signing) = SigningKey::from_bytes(&key.secret) else {
                    return String::new();
                };
                let signature: k256::schnorr::Signature = signing.sign(&id);
                let mut witness = Vec::with_capacity(1 + 32 + 64);
                witness.push(PUBLIC_KEY_ADDRESS);
                witness.extend_from_slice(&key.pubkey);
                witness.extend_from_slice(&signature.to_bytes());
                hex::encode(witness)
            })
            .collect()
    }

    /// Builds, validates and submits a transfer paying `outputs`.
    fn transfer(&mut self, mut outputs: Vec<Output>) -> Result<SendResult, ClientError> {
        self.ensure_initialized()?;

        let target = total_value(outputs.iter().map(|o| o.value));
        if target == 0 {
            return Ok((None, None));
        }

        let mut selected = Vec::new();
        let mut funded = 0u64;
        for utxo in &self.wallet.utxos {
            if funded >= target {
                break;
            }
            funded = funded.saturating_add(utxo.prevout_data.value);
            selected.push(*utxo);
        }
        if funded < target {
            tracing::warn!(target, funded, "insufficient funds for transfer");
            return Ok((None, None));
        }

        let change = funded - target;
        if change > 0 {
            let change_key = self.generate_key()?;
            outputs.push(Output {
                witness_program_commitment: witness_commitment(&change_key),
                value: change,
            });
        }

        let mut tx = FullTx {
            inputs: selected,
            outputs,
            witness: Vec::new(),
        };
        tx.witness = self.sign(&tx);

        if let Some(error) = check_transaction(&tx) {
            tracing::warn!(%error, "transfer rejected by static checks");
            return Ok((
                Some(tx),
                Some(ExecuteResponse {
                    tx_status: TxStatus::StaticInvalid,
                    tx_error: Some(error),
                }),
            ));
        }

        self.wallet
            .utxos
            .retain(|utxo| !tx.inputs.contains(utxo));

        let tx_status = match self.mode {
            ClientMode::Atomizer => {
                self.state.pending_txs.push(tx.clone());
                TxStatus::Pending
            }
            ClientMode::TwoPhase => {
                self.apply_confirmed(&tx);
                TxStatus::Confirmed
            }
        };
        self.save()?;

        tracing::info!(tx_id = %hash_to_hex(&tx_id(&tx)), %tx_status, "transfer submitted");
        Ok((
            Some(tx),
            Some(ExecuteResponse {
                tx_status,
                tx_error: None,
            }),
        ))
    }
}

impl Client for WalletClient {
    fn init(&mut self) -> Result<(), ClientError> {
        self.wallet = load_json(&self.wallet_path)?;
        self.state = load_json(&self.client_path)?;
        self.initialized = true;
        tracing::debug!(
            wallet = %self.wallet_path.display(),
            client = %self.client_path.display(),
            mode = ?self.mode,
            "wallet client initialized"
        );
        Ok(())
    }

    fn mint(&mut self, n_outputs: u64, value: u32) -> Result<FullTx, ClientError> {
        self.ensure_initialized()?;
        if n_outputs > MAX_TX_OUTPUTS {
            return Err(ClientError::TooManyOutputs {
                requested: n_outputs,
                max: MAX_TX_OUTPUTS,
            });
        }
        let key = self.generate_key()?;
        let commitment = witness_commitment(&key);
        let tx = FullTx {
            inputs: Vec::new(),
            outputs: (0..n_outputs)
                .map(|_| Output {
                    witness_program_commitment: commitment,
                    value: u64::from(value),
                })
                .collect(),
            witness: Vec::new(),
        };

        match self.mode {
            ClientMode::Atomizer => self.state.pending_txs.push(tx.clone()),
            ClientMode::TwoPhase => self.apply_confirmed(&tx),
        }
        self.save()?;

        tracing::info!(tx_id = %hash_to_hex(&tx_id(&tx)), n_outputs, value, "minted");
        Ok(tx)
    }

    fn send(&mut self, value: u32, payee: &PubKey) -> Result<SendResult, ClientError> {
        self.transfer(vec![Output {
            witness_program_commitment: witness_commitment(payee),
            value: u64::from(value),
        }])
    }

    fn fan(&mut self, count: u32, value: u32, payee: &PubKey) -> Result<SendResult, ClientError> {
        self.ensure_initialized()?;
        let target = u64::from(count) * u64::from(value);
        if u64::from(count) > MAX_TX_OUTPUTS || target > self.balance() {
            tracing::warn!(count, value, "fan cannot be funded");
            return Ok((None, None));
        }

        let commitment = witness_commitment(payee);
        self.transfer(
            (0..count)
                .map(|_| Output {
                    witness_program_commitment: commitment,
                    value: u64::from(value),
                })
                .collect(),
        )
    }

    fn new_address(&mut self) -> Result<PubKey, ClientError> {
        self.ensure_initialized()?;
        let key = self.generate_key()?;
        self.save()?;
        Ok(key)
    }

    fn import_send_input(&mut self, input: Input) -> Result<(), ClientError> {
        self.ensure_initialized()?;
        self.state.pending_inputs.push(input);
        self.save()?;
        tracing::info!(value = input.prevout_data.value, "input imported");
        Ok(())
    }

    fn confirm_transaction(&mut self, id: &Hash) -> Result<bool, ClientError> {
        self.ensure_initialized()?;
        let Some(position) = self
            .state
            .pending_txs
            .iter()
            .position(|tx| tx_id(tx) == *id)
        else {
            return Ok(false);
        };

        let tx = self.state.pending_txs.remove(position);
        self.apply_confirmed(&tx);
        self.save()?;
        tracing::info!(tx_id = %hash_to_hex(id), "transaction confirmed");
        Ok(true)
    }

    fn balance(&self) -> u64 {
        total_value(self.wallet.utxos.iter().map(|utxo| utxo.prevout_data.value))
    }

    fn utxo_count(&self) -> usize {
        self.wallet.utxos.len()
    }

    fn pending_tx_count(&self) -> usize {
        self.state.pending_txs.len()
    }

    fn sync(&mut self) -> Result<(), ClientError> {
        self.ensure_initialized()?;

        let pending = std::mem::take(&mut self.state.pending_txs);
        for tx in &pending {
            self.apply_confirmed(tx);
        }

        for input in std::mem::take(&mut self.state.pending_inputs) {
            if self.wallet.utxos.contains(&input) {
                continue;
            }
            if self
                .key_for(&input.prevout_data.witness_program_commitment)
                .is_some()
            {
                self.wallet.utxos.push(input);
            } else {
                tracing::warn!(
                    tx_id = %hash_to_hex(&input.prevout.tx_id),
                    index = input.prevout.index,
                    "dropping imported input not owned by this wallet"
                );
            }
        }

        self.save()?;
        tracing::info!(confirmed = pending.len(), "sync complete");
        Ok(())
    }
}

fn load_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, ClientError> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&content).map_err(|e| ClientError::CorruptState {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Hidden sibling a state file is written to before it replaces `path`.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "state".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{name}.tmp"))
}

/// A state file written to its temp path but not yet renamed into place.
///
/// Dropping it without [`commit`](Self::commit) removes the temp file.
struct StagedFile {
    temp: PathBuf,
    path: PathBuf,
    committed: bool,
}

impl StagedFile {
    fn write<T: Serialize>(path: &Path, value: &T) -> Result<Self, ClientError> {
        let content = serde_json::to_vec_pretty(value).map_err(|e| ClientError::CorruptState {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let staged = Self {
            temp: temp_path(path),
            path: path.to_path_buf(),
            committed: false,
        };
        {
            let mut file = File::create(&staged.temp)?;
            file.write_all(&content)?;
            file.sync_all()?;
        }

        // Owner read/write only: the wallet file holds secret keys.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&staged.temp)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&staged.temp, perms)?;
        }

        Ok(staged)
    }

    fn commit(mut self) -> Result<(), ClientError> {
        fs::rename(&self.temp, &self.path)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.temp);
        }
    }
}
