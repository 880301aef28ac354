//! In-process wallet and score contract
//!
//! `SandboxWallet` answers the same provider requests a real wallet bridge
//! would, backed by an in-memory copy of the score contract:
//!
//! - every player keeps their best score
//! - a fixed-capacity top list is kept sorted by score, one slot per player,
//!   and `getTopScores` pads unused slots with the zero address
//! - `recordScore` transactions are mined after a configurable number of
//!   receipt polls and emit `ScoreRecorded` / `LeaderboardUpdated` logs
//!
//! Used for offline play and as the ledger double in tests. Failure switches
//! (`reject_authorization`, `fail_reads`, `revert_next_submission`, ...) drive
//! every error path of the client.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use alloy_primitives::{keccak256, Address, Bytes, B256, U256, U64};
use alloy_sol_types::{SolCall, SolInterface, SolValue};
use serde_json::{json, Value};

use crate::abi::{IScoreBoard, ScoreBoardCall, LEADERBOARD_UPDATED_TOPIC, SCORE_RECORDED_TOPIC};
use crate::error::ProviderError;
use crate::provider::{methods, WalletProvider};
use crate::tx::{ReceiptLog, TransactionReceipt, TransactionRequest};

/// Leaderboard capacity of the sandbox contract.
pub const SANDBOX_TOP_COUNT: usize = 10;

/// Most recent method names kept by [`SandboxWallet::requests`].
pub const REQUEST_LOG_CAP: usize = 256;

/// Mined receipts kept for re-polling; older ones answer `null`.
pub const RECEIPT_CAP: usize = 64;

/// Account handed out by [`SandboxWallet::default`].
pub const SANDBOX_ACCOUNT: Address = Address::repeat_byte(0x5b);

#[derive(Debug, Clone)]
pub struct SandboxOptions {
    pub contract: Address,
    pub accounts: Vec<Address>,
    /// Wallet already authorized this client (`eth_accounts` non-empty).
    pub authorized: bool,
    pub top_count: usize,
    /// Receipt polls answered with `null` before a transaction is mined.
    pub confirm_after_polls: u32,
}

impl Default for SandboxOptions {
    fn default() -> Self {
        Self {
            contract: crate::config::DEFAULT_CONTRACT_ADDRESS,
            accounts: vec![SANDBOX_ACCOUNT],
            authorized: false,
            top_count: SANDBOX_TOP_COUNT,
            confirm_after_polls: 1,
        }
    }
}

#[derive(Debug, Clone)]
struct PendingTx {
    from: Address,
    score: U256,
    revert: bool,
    polls_left: u32,
}

#[derive(Debug)]
struct SandboxState {
    options: SandboxOptions,
    authorized: bool,
    reject_authorization: bool,
    fail_reads: bool,
    reject_next_send: bool,
    revert_next: bool,
    best: HashMap<Address, U256>,
    /// Sorted by score, highest first. At most `top_count` entries.
    top: Vec<(Address, U256)>,
    block_number: u64,
    nonce: u64,
    pending: HashMap<B256, PendingTx>,
    /// Oldest first, at most [`RECEIPT_CAP`].
    receipts: VecDeque<TransactionReceipt>,
    /// Oldest first, at most [`REQUEST_LOG_CAP`].
    requests: VecDeque<String>,
}

/// Shared handle; clones see the same contract state.
#[derive(Debug, Clone)]
pub struct SandboxWallet {
    state: Arc<Mutex<SandboxState>>,
}

impl Default for SandboxWallet {
    fn default() -> Self {
        Self::new(SandboxOptions::default())
    }
}

impl SandboxWallet {
    pub fn new(options: SandboxOptions) -> Self {
        let authorized = options.authorized;
        Self {
            state: Arc::new(Mutex::new(SandboxState {
                options,
                authorized,
                reject_authorization: false,
                fail_reads: false,
                reject_next_send: false,
                revert_next: false,
                best: HashMap::new(),
                top: Vec::new(),
                block_number: 0,
                nonce: 0,
                pending: HashMap::new(),
                receipts: VecDeque::new(),
                requests: VecDeque::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SandboxState> {
        // A panic while holding the lock only happens in a failing test.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn contract(&self) -> Address {
        self.lock().options.contract
    }

    pub fn default_account(&self) -> Option<Address> {
        self.lock().options.accounts.first().copied()
    }

    /// Decline the next and all later authorization prompts.
    pub fn set_reject_authorization(&self, reject: bool) {
        self.lock().reject_authorization = reject;
    }

    /// Make every `eth_call` fail as a reverted call.
    pub fn set_fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    /// The user declines the next transaction prompt.
    pub fn reject_next_submission(&self) {
        self.lock().reject_next_send = true;
    }

    /// The next transaction is mined but reverts.
    pub fn revert_next_submission(&self) {
        self.lock().revert_next = true;
    }

    /// Record a score directly, as if mined earlier.
    pub fn seed_score(&self, player: Address, score: u64) {
        self.lock().record(player, U256::from(score));
    }

    pub fn best_score_of(&self, player: &Address) -> u64 {
        self.lock()
            .best
            .get(player)
            .map(|v| crate::abi::to_u64_saturating(*v))
            .unwrap_or(0)
    }

    /// The latest method names received, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.iter().cloned().collect()
    }

    pub fn handle(&self, method: &str, params: &Value) -> Result<Value, ProviderError> {
        let mut st = self.lock();
        if st.requests.len() == REQUEST_LOG_CAP {
            st.requests.pop_front();
        }
        st.requests.push_back(method.to_string());
        match method {
            methods::REQUEST_ACCOUNTS => st.request_accounts(),
            methods::ACCOUNTS => Ok(st.accounts()),
            methods::CALL => st.call(first_param(params)?),
            methods::SEND_TRANSACTION => st.send_transaction(first_param(params)?),
            methods::GET_TRANSACTION_RECEIPT => st.receipt(first_param(params)?),
            other => Err(ProviderError::Rpc {
                code: -32601,
                message: format!("method not found: {other}"),
            }),
        }
    }
}

impl WalletProvider for SandboxWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.handle(method, &params)
    }
}

fn first_param<T: serde::de::DeserializeOwned>(params: &Value) -> Result<T, ProviderError> {
    let first = params
        .as_array()
        .and_then(|a| a.first())
        .cloned()
        .ok_or_else(|| invalid_params("missing first parameter"))?;
    serde_json::from_value(first).map_err(|e| invalid_params(&e.to_string()))
}

fn invalid_params(msg: &str) -> ProviderError {
    ProviderError::Rpc {
        code: -32602,
        message: format!("invalid params: {msg}"),
    }
}

fn reverted() -> ProviderError {
    ProviderError::Rpc {
        code: -32000,
        message: "execution reverted".to_string(),
    }
}

fn to_json<T: serde::Serialize>(v: &T) -> Result<Value, ProviderError> {
    serde_json::to_value(v).map_err(ProviderError::from)
}

impl SandboxState {
    fn request_accounts(&mut self) -> Result<Value, ProviderError> {
        if self.reject_authorization {
            return Err(ProviderError::Rpc {
                code: ProviderError::USER_REJECTED_CODE,
                message: "User rejected the request.".to_string(),
            });
        }
        self.authorized = true;
        Ok(self.accounts())
    }

    fn accounts(&self) -> Value {
        if !self.authorized {
            return json!([]);
        }
        let list: Vec<String> = self
            .options
            .accounts
            .iter()
            .map(|a| format!("{a:#x}"))
            .collect();
        json!(list)
    }

    fn caller(&self, req: &TransactionRequest) -> Address {
        req.from
            .or_else(|| self.options.accounts.first().copied())
            .unwrap_or(Address::ZERO)
    }

    fn call(&mut self, req: TransactionRequest) -> Result<Value, ProviderError> {
        if self.fail_reads {
            return Err(reverted());
        }
        if req.to != Some(self.options.contract) {
            // No code at that address: empty return data.
            return to_json(&Bytes::new());
        }
        let data = req.data.clone().unwrap_or_default();
        let call = ScoreBoardCall::abi_decode(&data, true).map_err(|_| reverted())?;

        let out: Vec<u8> = match call {
            ScoreBoardCall::getMyBestScore(_) => {
                let best = self.best.get(&self.caller(&req)).copied().unwrap_or(U256::ZERO);
                best.abi_encode()
            }
            ScoreBoardCall::getTopScores(_) => {
                let mut players = vec![Address::ZERO; self.options.top_count];
                let mut scores = vec![U256::ZERO; self.options.top_count];
                for (i, (p, s)) in self.top.iter().enumerate() {
                    players[i] = *p;
                    scores[i] = *s;
                }
                IScoreBoard::getTopScoresCall::abi_encode_returns(&(players, scores))
            }
            ScoreBoardCall::getTopCount(_) => U256::from(self.options.top_count).abi_encode(),
            ScoreBoardCall::recordScore(_) => Vec::new(),
        };
        to_json(&Bytes::from(out))
    }

    fn send_transaction(&mut self, req: TransactionRequest) -> Result<Value, ProviderError> {
        if !self.authorized {
            return Err(ProviderError::Rpc {
                code: ProviderError::UNAUTHORIZED_CODE,
                message: "The requested account has not been authorized.".to_string(),
            });
        }
        if std::mem::take(&mut self.reject_next_send) {
            return Err(ProviderError::Rpc {
                code: ProviderError::USER_REJECTED_CODE,
                message: "User denied transaction signature.".to_string(),
            });
        }
        if req.to != Some(self.options.contract) {
            return Err(ProviderError::Rpc {
                code: -32000,
                message: "no contract code at target address".to_string(),
            });
        }
        let data = req.data.clone().unwrap_or_default();
        let call = IScoreBoard::recordScoreCall::abi_decode(&data, true)
            .map_err(|e| invalid_params(&e.to_string()))?;

        let from = self.caller(&req);
        self.nonce += 1;
        let mut preimage = Vec::with_capacity(20 + 8 + data.len());
        preimage.extend_from_slice(from.as_slice());
        preimage.extend_from_slice(&self.nonce.to_be_bytes());
        preimage.extend_from_slice(&data);
        let hash = keccak256(&preimage);

        self.pending.insert(
            hash,
            PendingTx {
                from,
                score: call._score,
                revert: std::mem::take(&mut self.revert_next),
                polls_left: self.options.confirm_after_polls,
            },
        );
        to_json(&hash)
    }

    fn receipt(&mut self, hash: B256) -> Result<Value, ProviderError> {
        if let Some(receipt) = self.receipts.iter().find(|r| r.transaction_hash == hash) {
            return to_json(receipt);
        }
        let Some(tx) = self.pending.get_mut(&hash) else {
            return Ok(Value::Null);
        };
        if tx.polls_left > 0 {
            tx.polls_left -= 1;
            return Ok(Value::Null);
        }
        let Some(tx) = self.pending.remove(&hash) else {
            return Ok(Value::Null);
        };

        self.block_number += 1;
        let mut logs = Vec::new();
        let status = if tx.revert {
            U64::ZERO
        } else {
            let contract = self.options.contract;
            let player_topic = tx.from.into_word();
            let data: Bytes = tx.score.abi_encode().into();
            logs.push(ReceiptLog {
                address: contract,
                topics: vec![SCORE_RECORDED_TOPIC, player_topic],
                data: data.clone(),
            });
            if self.record(tx.from, tx.score) {
                logs.push(ReceiptLog {
                    address: contract,
                    topics: vec![LEADERBOARD_UPDATED_TOPIC, player_topic],
                    data,
                });
            }
            U64::from(1u64)
        };

        let receipt = TransactionReceipt {
            transaction_hash: hash,
            block_number: Some(U64::from(self.block_number)),
            status: Some(status),
            logs,
        };
        let out = to_json(&receipt);
        if self.receipts.len() == RECEIPT_CAP {
            self.receipts.pop_front();
        }
        self.receipts.push_back(receipt);
        out
    }

    /// Apply `recordScore`. Returns true if the top list changed.
    fn record(&mut self, player: Address, score: U256) -> bool {
        let best = self.best.entry(player).or_insert(U256::ZERO);
        if score > *best {
            *best = score;
        }

        let cap = self.options.top_count;
        let changed = match self.top.iter().position(|(p, _)| *p == player) {
            Some(i) if score > self.top[i].1 => {
                self.top[i].1 = score;
                true
            }
            Some(_) => false,
            None if self.top.len() < cap => {
                self.top.push((player, score));
                true
            }
            None => match self.top.last() {
                Some((_, lowest)) if score > *lowest => {
                    self.top.pop();
                    self.top.push((player, score));
                    true
                }
                _ => false,
            },
        };
        if changed {
            // Stable: equal scores keep their earlier slot.
            self.top.sort_by(|a, b| b.1.cmp(&a.1));
        }
        changed
    }
}
