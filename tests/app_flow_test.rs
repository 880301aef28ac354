//! App controller driven end to end against the sandbox ledger

use std::time::Duration;

use tokio::sync::mpsc;

use memo_match::app::{App, BestScore, LeaderboardView, Submission, WalletStatus};
use memo_match::ledger::{run_worker, LedgerClient, LedgerEvent, LedgerRequest, SandboxWallet};
use memo_match::types::{GameAction, GamePhase, NoticeLevel, DECK_SIZE, TICK_MS};

struct Rig {
    app: App,
    req_tx: mpsc::UnboundedSender<LedgerRequest>,
    event_rx: mpsc::UnboundedReceiver<LedgerEvent>,
}

impl Rig {
    fn new(wallet: &SandboxWallet, seed: u32) -> Self {
        let client = LedgerClient::new(wallet.clone(), wallet.contract())
            .with_poll_interval(Duration::from_millis(1));
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(client, req_rx, event_tx));
        Self {
            app: App::new(seed, wallet.contract()),
            req_tx,
            event_rx,
        }
    }

    fn act(&mut self, action: GameAction) {
        self.app.handle_action(action);
        for req in self.app.take_requests() {
            self.req_tx.send(req).unwrap();
        }
    }

    /// Apply events until `done` holds for the app.
    async fn settle(&mut self, done: impl Fn(&App) -> bool) {
        while !done(&self.app) {
            let ev = tokio::time::timeout(Duration::from_secs(2), self.event_rx.recv())
                .await
                .expect("timeout waiting for ledger event")
                .expect("worker stopped");
            self.app.apply_ledger_event(ev);
            for req in self.app.take_requests() {
                self.req_tx.send(req).unwrap();
            }
        }
    }

    fn play_perfect_game(&mut self) {
        let cards = *self.app.game().board().cards();
        let mut done = [false; DECK_SIZE];
        for i in 0..DECK_SIZE {
            if done[i] {
                continue;
            }
            let twin = (i + 1..DECK_SIZE)
                .find(|&j| cards[j].symbol == cards[i].symbol)
                .unwrap();
            done[i] = true;
            done[twin] = true;
            self.act(GameAction::FlipAt(i));
            self.act(GameAction::FlipAt(twin));
        }
    }
}

#[tokio::test]
async fn connect_play_submit_and_see_leaderboard() {
    let wallet = SandboxWallet::default();
    let mut rig = Rig::new(&wallet, 31);

    rig.act(GameAction::ConnectWallet);
    rig.settle(|app| matches!(app.leaderboard(), LeaderboardView::Loaded(_)))
        .await;
    assert!(matches!(rig.app.wallet(), WalletStatus::Connected(_)));
    assert_eq!(rig.app.best_score(), BestScore::Known(0));

    rig.play_perfect_game();
    assert_eq!(rig.app.game().phase(), GamePhase::Ended);
    assert_eq!(rig.app.game().final_score(), Some(9920));

    rig.act(GameAction::SubmitScore);
    assert!(rig.app.submission().in_flight());
    rig.settle(|app| app.best_score() == BestScore::Known(9920)).await;
    rig.settle(|app| match app.leaderboard() {
        LeaderboardView::Loaded(rows) => rows.len() == 1,
        _ => false,
    })
    .await;

    assert_eq!(rig.app.submission(), Submission::Idle);
    let messages: Vec<_> = rig.app.notices().iter().map(|n| n.message.clone()).collect();
    assert!(messages.iter().any(|m| m == "Score recorded successfully!"));
}

#[tokio::test]
async fn submit_requires_wallet() {
    let wallet = SandboxWallet::default();
    let mut rig = Rig::new(&wallet, 5);
    rig.play_perfect_game();
    rig.act(GameAction::SubmitScore);

    let notice = rig.app.notices().latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Please connect your wallet first");
    assert_eq!(rig.app.submission(), Submission::Idle);
}

#[tokio::test]
async fn board_keeps_running_while_ledger_is_busy() {
    let wallet = SandboxWallet::default();
    let mut rig = Rig::new(&wallet, 8);
    rig.act(GameAction::ConnectWallet);

    // No events applied yet; the game still accepts input and time.
    rig.act(GameAction::FlipAt(0));
    rig.app.tick(1000);
    assert_eq!(rig.app.game().elapsed_seconds(), 1);
    assert_eq!(rig.app.game().revealed(), &[0]);

    rig.settle(|app| matches!(app.wallet(), WalletStatus::Connected(_)))
        .await;
}

#[tokio::test]
async fn best_score_read_failure_shows_unknown() {
    let wallet = SandboxWallet::default();
    let mut rig = Rig::new(&wallet, 2);
    wallet.set_fail_reads(true);
    rig.act(GameAction::ConnectWallet);
    rig.settle(|app| matches!(app.leaderboard(), LeaderboardView::Failed(_)))
        .await;

    assert_eq!(rig.app.best_score(), BestScore::Unknown);
    let errors = rig
        .app
        .notices()
        .iter()
        .filter(|n| n.level == NoticeLevel::Error)
        .count();
    assert_eq!(errors, 2);

    // Notices fade out on the game clock.
    for _ in 0..(5000 / TICK_MS + 1) {
        rig.app.tick(TICK_MS);
    }
    assert!(rig.app.notices().is_empty());
}
