//! Application controller
//!
//! `App` is the single owner of everything the player sees: the running game,
//! the grid cursor, the wallet session, the on-chain best score and
//! leaderboard, the in-flight submission and the notification stack.
//!
//! It never touches the network. Ledger work is queued as [`LedgerRequest`]s
//! (drained by the caller with [`App::take_requests`]) and results come back
//! through [`App::apply_ledger_event`].

use crate::core::{FlipOutcome, GameSnapshot, GameState, TickReport};
use crate::ledger::{
    short_hash, Address, Confirmation, LeaderboardEntry, LedgerError, LedgerEvent,
    LedgerRequest, Session, B256,
};
use crate::notify::Notices;
use crate::types::*;

pub const MSG_CONNECT_FIRST: &str = "Please connect your wallet first";
pub const MSG_CONNECTED: &str = "Wallet connected successfully!";
pub const MSG_NO_PROVIDER: &str = "No wallet provider available";
pub const MSG_SUBMITTING: &str = "Submitting score to blockchain...";
pub const MSG_TX_SENT: &str = "Transaction sent! Waiting for confirmation...";
pub const MSG_RECORDED: &str = "Score recorded successfully!";
pub const MSG_FINISH_FIRST: &str = "Finish the game before submitting a score";
pub const MSG_SUBMIT_BUSY: &str = "A score submission is already in progress";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletStatus {
    Disconnected,
    Connecting,
    Connected(Session),
}

impl WalletStatus {
    pub fn session(&self) -> Option<&Session> {
        match self {
            WalletStatus::Connected(s) => Some(s),
            _ => None,
        }
    }
}

/// The player's best on-chain score, as far as we know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BestScore {
    /// Not read yet, or the last read failed.
    #[default]
    Unknown,
    Known(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LeaderboardView {
    #[default]
    NotLoaded,
    /// Filled slots only; empty means nobody has scored yet.
    Loaded(Vec<LeaderboardEntry>),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Submission {
    #[default]
    Idle,
    /// Handed to the wallet, no transaction hash yet.
    Sending { score: u64 },
    /// Waiting for the transaction to be mined.
    Pending { tx_hash: B256, score: u64 },
}

impl Submission {
    pub fn in_flight(&self) -> bool {
        !matches!(self, Submission::Idle)
    }
}

pub struct App {
    game: GameState,
    cursor: usize,
    contract: Address,
    wallet: WalletStatus,
    best: BestScore,
    leaderboard: LeaderboardView,
    top_count: Option<u64>,
    submission: Submission,
    last_confirmation: Option<Confirmation>,
    notices: Notices,
    requests: Vec<LedgerRequest>,
}

impl App {
    /// Create the app with a game already dealt.
    pub fn new(seed: u32, contract: Address) -> Self {
        let mut game = GameState::new(seed);
        game.new_game();
        Self {
            game,
            cursor: 0,
            contract,
            wallet: WalletStatus::Disconnected,
            best: BestScore::Unknown,
            leaderboard: LeaderboardView::NotLoaded,
            top_count: None,
            submission: Submission::Idle,
            last_confirmation: None,
            notices: Notices::new(),
            requests: Vec::new(),
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    pub fn wallet(&self) -> &WalletStatus {
        &self.wallet
    }

    pub fn session(&self) -> Option<&Session> {
        self.wallet.session()
    }

    pub fn best_score(&self) -> BestScore {
        self.best
    }

    pub fn leaderboard(&self) -> &LeaderboardView {
        &self.leaderboard
    }

    pub fn top_count(&self) -> Option<u64> {
        self.top_count
    }

    pub fn submission(&self) -> Submission {
        self.submission
    }

    pub fn last_confirmation(&self) -> Option<&Confirmation> {
        self.last_confirmation.as_ref()
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    /// Ledger work queued since the last call, oldest first.
    pub fn take_requests(&mut self) -> Vec<LedgerRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Ask the wallet for an existing authorization (startup).
    pub fn resume_session(&mut self) {
        if self.wallet == WalletStatus::Disconnected {
            self.wallet = WalletStatus::Connecting;
            self.requests.push(LedgerRequest::Reconnect);
        }
    }

    pub fn handle_action(&mut self, action: GameAction) {
        tracing::trace!(action = action.as_str(), "action");
        match action {
            GameAction::MoveCursor(dir) => self.move_cursor(dir),
            GameAction::Flip => self.flip(self.cursor),
            GameAction::FlipAt(index) => {
                if index < DECK_SIZE {
                    self.cursor = index;
                }
                self.flip(index);
            }
            GameAction::NewGame => {
                self.game.new_game();
                tracing::debug!(game_id = self.game.game_id(), "new game");
            }
            GameAction::ConnectWallet => self.connect(),
            GameAction::SubmitScore => self.submit(),
            GameAction::RefreshBestScore => {
                if self.session().is_some() {
                    self.requests.push(LedgerRequest::RefreshBestScore);
                } else {
                    self.notices.error(MSG_CONNECT_FIRST);
                }
            }
            GameAction::RefreshLeaderboard => self.requests.push(LedgerRequest::RefreshLeaderboard),
        }
    }

    fn move_cursor(&mut self, dir: Direction) {
        let (col, row) = (self.cursor % BOARD_COLS, self.cursor / BOARD_COLS);
        let (col, row) = match dir {
            Direction::Left => (col.saturating_sub(1), row),
            Direction::Right => ((col + 1).min(BOARD_COLS - 1), row),
            Direction::Up => (col, row.saturating_sub(1)),
            Direction::Down => (col, (row + 1).min(BOARD_ROWS - 1)),
        };
        self.cursor = row * BOARD_COLS + col;
    }

    fn flip(&mut self, index: usize) {
        let outcome = self.game.flip(index);
        match outcome {
            _ if outcome.is_ignored() => tracing::trace!(index, ?outcome, "flip ignored"),
            FlipOutcome::Matched { symbol, .. } => {
                tracing::debug!(symbol = symbol.as_str(), "pair matched");
            }
            FlipOutcome::Completed { score, .. } => tracing::info!(
                game_id = self.game.game_id(),
                moves = self.game.moves(),
                seconds = self.game.elapsed_seconds(),
                score,
                "game completed"
            ),
            _ => {}
        }
    }

    fn connect(&mut self) {
        match self.wallet {
            WalletStatus::Connecting => {}
            WalletStatus::Connected(session) => {
                self.notices
                    .info(format!("Wallet already connected: {}", session.short_account()));
            }
            WalletStatus::Disconnected => {
                self.wallet = WalletStatus::Connecting;
                self.requests.push(LedgerRequest::Connect);
            }
        }
    }

    fn submit(&mut self) {
        if self.session().is_none() {
            self.notices.error(MSG_CONNECT_FIRST);
            return;
        }
        let Some(score) = self.game.final_score() else {
            self.notices.info(MSG_FINISH_FIRST);
            return;
        };
        if self.submission.in_flight() {
            self.notices.info(MSG_SUBMIT_BUSY);
            return;
        }
        let score = u64::from(score);
        self.submission = Submission::Sending { score };
        self.requests.push(LedgerRequest::SubmitScore { score });
        self.notices.info(MSG_SUBMITTING);
    }

    /// Fold a ledger result into the app state.
    pub fn apply_ledger_event(&mut self, event: LedgerEvent) {
        match event {
            LedgerEvent::Connected { session, .. } => {
                self.wallet = WalletStatus::Connected(session);
                self.notices.success(MSG_CONNECTED);
            }
            LedgerEvent::ConnectFailed { error, resumed } => {
                self.wallet = WalletStatus::Disconnected;
                match error {
                    // Startup probe without a wallet is not worth a notice.
                    LedgerError::WalletUnavailable if resumed => {
                        tracing::debug!("no wallet provider at startup");
                    }
                    LedgerError::WalletUnavailable => {
                        self.notices.error(MSG_NO_PROVIDER);
                    }
                    other => {
                        self.notices
                            .error(format!("Failed to connect wallet: {}", other.detail()));
                    }
                }
            }
            LedgerEvent::NoSession => {
                self.wallet = WalletStatus::Disconnected;
            }
            LedgerEvent::BestScore(Ok(best)) => self.best = BestScore::Known(best),
            LedgerEvent::BestScore(Err(e)) => {
                self.best = BestScore::Unknown;
                self.notices
                    .error(format!("Could not load best score: {}", e.detail()));
            }
            LedgerEvent::Leaderboard(Ok(rows)) => self.leaderboard = LeaderboardView::Loaded(rows),
            LedgerEvent::Leaderboard(Err(e)) => {
                self.notices
                    .error(format!("Could not load leaderboard: {}", e.detail()));
                self.leaderboard = LeaderboardView::Failed(e.detail());
            }
            LedgerEvent::TopCount(count) => self.top_count = Some(count),
            LedgerEvent::SubmissionPending { tx_hash, score } => {
                self.submission = Submission::Pending { tx_hash, score };
                tracing::debug!(tx = %short_hash(&tx_hash), "awaiting confirmation");
                self.notices.info(MSG_TX_SENT);
            }
            LedgerEvent::SubmissionConfirmed(confirmation) => {
                self.submission = Submission::Idle;
                self.last_confirmation = Some(confirmation);
                self.notices.success(MSG_RECORDED);
            }
            LedgerEvent::SubmissionFailed(e) => {
                self.submission = Submission::Idle;
                self.notices
                    .error(format!("Failed to submit score: {}", e.detail()));
            }
        }
    }

    /// Advance the game clock and age notifications.
    pub fn tick(&mut self, elapsed_ms: u32) -> TickReport {
        self.notices.tick(elapsed_ms);
        self.game.tick(elapsed_ms)
    }
}
