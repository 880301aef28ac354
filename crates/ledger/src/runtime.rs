//! Ledger runtime integration.
//!
//! Bridges the sync game loop with the async ledger client. The loop pushes
//! [`LedgerRequest`]s and drains [`LedgerEvent`]s without blocking; a single
//! worker task runs the requests strictly in order.

use anyhow::Context;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::client::LedgerClient;
use crate::error::LedgerError;
use crate::provider::WalletProvider;
use crate::session::{Confirmation, LeaderboardEntry, Session};

/// Work item for the ledger worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerRequest {
    /// Prompt the wallet for authorization.
    Connect,
    /// Resume an existing authorization without prompting.
    Reconnect,
    RefreshBestScore,
    RefreshLeaderboard,
    SubmitScore { score: u64 },
}

/// Outcome reported back to the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    Connected { session: Session, resumed: bool },
    ConnectFailed { error: LedgerError, resumed: bool },
    /// Reconnect found no authorized account.
    NoSession,
    BestScore(Result<u64, LedgerError>),
    Leaderboard(Result<Vec<LeaderboardEntry>, LedgerError>),
    /// Leaderboard capacity reported by the contract.
    TopCount(u64),
    /// The wallet accepted the transaction; waiting for it to be mined.
    SubmissionPending { tx_hash: alloy_primitives::B256, score: u64 },
    SubmissionConfirmed(Confirmation),
    SubmissionFailed(LedgerError),
}

/// Running ledger worker.
pub struct LedgerRuntime {
    rt: Runtime,
    req_tx: mpsc::UnboundedSender<LedgerRequest>,
    event_rx: mpsc::UnboundedReceiver<LedgerEvent>,
}

impl LedgerRuntime {
    pub fn start<P>(client: LedgerClient<P>) -> anyhow::Result<Self>
    where
        P: WalletProvider + 'static,
    {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let (req_tx, req_rx) = mpsc::unbounded_channel::<LedgerRequest>();
        let (event_tx, event_rx) = mpsc::unbounded_channel::<LedgerEvent>();

        rt.spawn(run_worker(client, req_rx, event_tx));

        Ok(Self {
            rt,
            req_tx,
            event_rx,
        })
    }

    pub fn send(&self, req: LedgerRequest) {
        if self.req_tx.send(req).is_err() {
            tracing::warn!(?req, "ledger worker stopped, request dropped");
        }
    }

    pub fn try_recv(&mut self) -> Option<LedgerEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Stop the worker without waiting for in-flight wallet calls.
    pub fn shutdown(self) {
        self.rt.shutdown_background();
    }
}

/// Worker loop; returns when the request channel closes.
pub async fn run_worker<P: WalletProvider>(
    client: LedgerClient<P>,
    mut req_rx: mpsc::UnboundedReceiver<LedgerRequest>,
    event_tx: mpsc::UnboundedSender<LedgerEvent>,
) {
    let mut worker = Worker {
        client,
        session: None,
        top_count: None,
        event_tx,
    };
    while let Some(req) = req_rx.recv().await {
        tracing::debug!(?req, "ledger request");
        if !worker.handle(req).await {
            break;
        }
    }
    tracing::debug!("ledger worker finished");
}

struct Worker<P> {
    client: LedgerClient<P>,
    session: Option<Session>,
    top_count: Option<u64>,
    event_tx: mpsc::UnboundedSender<LedgerEvent>,
}

impl<P: WalletProvider> Worker<P> {
    /// False once nobody is listening for events.
    fn emit(&self, event: LedgerEvent) -> bool {
        self.event_tx.send(event).is_ok()
    }

    async fn handle(&mut self, req: LedgerRequest) -> bool {
        match req {
            LedgerRequest::Connect => self.connect(false).await,
            LedgerRequest::Reconnect => self.connect(true).await,
            LedgerRequest::RefreshBestScore => self.refresh_best_score().await,
            LedgerRequest::RefreshLeaderboard => self.refresh_leaderboard().await,
            LedgerRequest::SubmitScore { score } => self.submit(score).await,
        }
    }

    async fn connect(&mut self, resumed: bool) -> bool {
        let result = if resumed {
            self.client.reconnect().await
        } else {
            self.client.connect().await.map(Some)
        };
        match result {
            Ok(Some(session)) => {
                self.session = Some(session);
                self.emit(LedgerEvent::Connected { session, resumed })
                    && self.refresh_best_score().await
                    && self.refresh_leaderboard().await
            }
            Ok(None) => self.emit(LedgerEvent::NoSession),
            Err(error) => {
                tracing::warn!(%error, resumed, "wallet connection failed");
                self.emit(LedgerEvent::ConnectFailed { error, resumed })
            }
        }
    }

    async fn refresh_best_score(&mut self) -> bool {
        let Some(session) = self.session else {
            tracing::debug!("best score refresh skipped, no session");
            return true;
        };
        let result = self.client.fetch_best_score(&session).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "best score read failed");
        }
        self.emit(LedgerEvent::BestScore(result))
    }

    async fn refresh_leaderboard(&mut self) -> bool {
        if self.top_count.is_none() {
            match self.client.fetch_top_count().await {
                Ok(count) => {
                    self.top_count = Some(count);
                    if !self.emit(LedgerEvent::TopCount(count)) {
                        return false;
                    }
                }
                Err(e) => tracing::debug!(error = %e, "top count read failed"),
            }
        }
        let result = self.client.fetch_leaderboard().await;
        match &result {
            Ok(rows) => tracing::debug!(rows = rows.len(), "leaderboard loaded"),
            Err(e) => tracing::warn!(error = %e, "leaderboard read failed"),
        }
        self.emit(LedgerEvent::Leaderboard(result))
    }

    async fn submit(&mut self, score: u64) -> bool {
        let Some(session) = self.session else {
            return self.emit(LedgerEvent::SubmissionFailed(LedgerError::SubmissionFailed(
                "wallet not connected".to_string(),
            )));
        };
        let pending = match self.client.submit_score(&session, score).await {
            Ok(p) => p,
            Err(e) => return self.emit(LedgerEvent::SubmissionFailed(e)),
        };
        if !self.emit(LedgerEvent::SubmissionPending {
            tx_hash: pending.tx_hash,
            score,
        }) {
            return false;
        }
        match self.client.await_confirmation(&pending).await {
            Ok(confirmation) => {
                self.emit(LedgerEvent::SubmissionConfirmed(confirmation))
                    && self.refresh_best_score().await
                    && self.refresh_leaderboard().await
            }
            Err(e) => self.emit(LedgerEvent::SubmissionFailed(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::SandboxWallet;

    #[test]
    fn runtime_round_trip() {
        let wallet = SandboxWallet::default();
        let client = LedgerClient::new(wallet.clone(), wallet.contract());
        let mut rt = LedgerRuntime::start(client).unwrap();
        rt.send(LedgerRequest::Reconnect);

        let mut got = None;
        for _ in 0..200 {
            if let Some(ev) = rt.try_recv() {
                got = Some(ev);
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(got, Some(LedgerEvent::NoSession));
        rt.shutdown();
    }
}
