//! Ledger client: wallet session, contract reads, score submission.

use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::abi;
use crate::config::LedgerConfig;
use crate::error::{LedgerError, ProviderError};
use crate::provider::{methods, WalletProvider};
use crate::session::{Confirmation, LeaderboardEntry, PendingSubmission, Session};
use crate::tx::{TransactionReceipt, TransactionRequest};

pub struct LedgerClient<P> {
    provider: P,
    contract: Address,
    poll_interval: Duration,
}

impl<P: WalletProvider> LedgerClient<P> {
    pub fn new(provider: P, contract: Address) -> Self {
        Self {
            provider,
            contract,
            poll_interval: Duration::from_millis(crate::config::DEFAULT_POLL_MS),
        }
    }

    pub fn from_config(provider: P, config: &LedgerConfig) -> Self {
        Self::new(provider, config.contract).with_poll_interval(config.poll_interval)
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    /// Ask the wallet to authorize this client.
    pub async fn connect(&self) -> Result<Session, LedgerError> {
        let value = self
            .provider
            .request(methods::REQUEST_ACCOUNTS, json!([]))
            .await
            .map_err(LedgerError::from_connect)?;
        let accounts: Vec<Address> = decode(value).map_err(LedgerError::from_connect)?;
        let Some(account) = accounts.first().copied() else {
            return Err(LedgerError::ConnectionFailed("wallet returned no accounts".to_string()));
        };
        tracing::info!(account = %account, "wallet connected");
        Ok(Session::new(account))
    }

    /// Resume a session the wallet already authorized, without prompting.
    pub async fn reconnect(&self) -> Result<Option<Session>, LedgerError> {
        let value = self
            .provider
            .request(methods::ACCOUNTS, json!([]))
            .await
            .map_err(LedgerError::from_connect)?;
        let accounts: Vec<Address> = decode(value).map_err(LedgerError::from_connect)?;
        let session = accounts.first().copied().map(Session::new);
        match &session {
            Some(s) => tracing::info!(account = %s.account, "wallet session resumed"),
            None => tracing::debug!("wallet has no authorized accounts"),
        }
        Ok(session)
    }

    async fn call(&self, from: Option<Address>, data: Bytes) -> Result<Bytes, ProviderError> {
        let mut req = TransactionRequest::call(self.contract, data);
        if let Some(from) = from {
            req = req.with_from(from);
        }
        let value = self
            .provider
            .request(methods::CALL, json!([req, "latest"]))
            .await?;
        decode(value)
    }

    pub async fn fetch_best_score(&self, session: &Session) -> Result<u64, LedgerError> {
        let out = self
            .call(Some(session.account), abi::encode_get_my_best_score())
            .await
            .map_err(LedgerError::from_read)?;
        let best = abi::decode_best_score(&out)
            .map_err(|e| LedgerError::from_read(e.into()))?;
        Ok(abi::to_u64_saturating(best))
    }

    /// Filled leaderboard slots, highest first. Zero-address slots are skipped;
    /// ranks keep the contract's slot numbering.
    pub async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, LedgerError> {
        let out = self
            .call(None, abi::encode_get_top_scores())
            .await
            .map_err(LedgerError::from_read)?;
        let (players, scores) =
            abi::decode_top_scores(&out).map_err(|e| LedgerError::from_read(e.into()))?;
        if players.len() != scores.len() {
            return Err(LedgerError::ReadError(format!(
                "leaderboard arrays differ in length: {} players, {} scores",
                players.len(),
                scores.len()
            )));
        }
        Ok(leaderboard_entries(&players, &scores))
    }

    pub async fn fetch_top_count(&self) -> Result<u64, LedgerError> {
        let out = self
            .call(None, abi::encode_get_top_count())
            .await
            .map_err(LedgerError::from_read)?;
        let count = abi::decode_top_count(&out).map_err(|e| LedgerError::from_read(e.into()))?;
        Ok(abi::to_u64_saturating(count))
    }

    /// Send `recordScore(score)` from the session account. Returns once the
    /// wallet accepted the transaction; see [`Self::await_confirmation`].
    pub async fn submit_score(
        &self,
        session: &Session,
        score: u64,
    ) -> Result<PendingSubmission, LedgerError> {
        let req = TransactionRequest::call(self.contract, abi::encode_record_score(score))
            .with_from(session.account);
        let value = self
            .provider
            .request(methods::SEND_TRANSACTION, json!([req]))
            .await
            .map_err(LedgerError::from_submit)?;
        let tx_hash: B256 = decode(value).map_err(LedgerError::from_submit)?;
        tracing::info!(tx = %tx_hash, score, "score transaction sent");
        Ok(PendingSubmission { tx_hash, score })
    }

    /// Poll for the receipt until it appears. There is no timeout.
    pub async fn await_confirmation(
        &self,
        pending: &PendingSubmission,
    ) -> Result<Confirmation, LedgerError> {
        let mut polls: u64 = 0;
        let receipt = loop {
            let value = self
                .provider
                .request(methods::GET_TRANSACTION_RECEIPT, json!([pending.tx_hash]))
                .await
                .map_err(LedgerError::from_submit)?;
            polls += 1;
            if !value.is_null() {
                break decode::<TransactionReceipt>(value).map_err(LedgerError::from_submit)?;
            }
            tracing::trace!(tx = %pending.tx_hash, polls, "receipt not available yet");
            tokio::time::sleep(self.poll_interval).await;
        };

        if !receipt.succeeded() {
            tracing::warn!(tx = %pending.tx_hash, "score transaction reverted");
            return Err(LedgerError::SubmissionFailed("transaction reverted".to_string()));
        }

        let confirmation = Confirmation {
            tx_hash: pending.tx_hash,
            score: pending.score,
            block_number: receipt.block_number.map(|n| n.to::<u64>()),
            score_recorded: receipt.has_log(self.contract, abi::SCORE_RECORDED_TOPIC),
            leaderboard_updated: receipt.has_log(self.contract, abi::LEADERBOARD_UPDATED_TOPIC),
        };
        tracing::info!(
            tx = %pending.tx_hash,
            block = ?confirmation.block_number,
            leaderboard_updated = confirmation.leaderboard_updated,
            polls,
            "score transaction confirmed"
        );
        Ok(confirmation)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ProviderError> {
    serde_json::from_value(value).map_err(ProviderError::from)
}

/// Pair up the contract's parallel arrays, dropping empty slots.
pub fn leaderboard_entries(players: &[Address], scores: &[alloy_primitives::U256]) -> Vec<LeaderboardEntry> {
    players
        .iter()
        .zip(scores)
        .enumerate()
        .filter(|(_, (player, _))| !player.is_zero())
        .map(|(i, (player, score))| LeaderboardEntry {
            rank: i as u32 + 1,
            player: *player,
            score: abi::to_u64_saturating(*score),
        })
        .collect()
}
