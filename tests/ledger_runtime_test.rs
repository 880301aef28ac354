//! Ledger worker ordering and the sync runtime bridge

use std::time::Duration;

use tokio::sync::mpsc;

use memo_match::ledger::{
    run_worker, LedgerClient, LedgerError, LedgerEvent, LedgerRequest, LedgerRuntime,
    SandboxOptions, SandboxWallet,
};

struct Harness {
    req_tx: mpsc::UnboundedSender<LedgerRequest>,
    event_rx: mpsc::UnboundedReceiver<LedgerEvent>,
    worker: tokio::task::JoinHandle<()>,
}

fn spawn(wallet: &SandboxWallet) -> Harness {
    let client = LedgerClient::new(wallet.clone(), wallet.contract())
        .with_poll_interval(Duration::from_millis(1));
    let (req_tx, req_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(run_worker(client, req_rx, event_tx));
    Harness {
        req_tx,
        event_rx,
        worker,
    }
}

impl Harness {
    async fn next(&mut self) -> LedgerEvent {
        tokio::time::timeout(Duration::from_secs(2), self.event_rx.recv())
            .await
            .expect("timeout waiting for ledger event")
            .expect("worker stopped")
    }

    async fn finish(self) {
        drop(self.req_tx);
        tokio::time::timeout(Duration::from_secs(2), self.worker)
            .await
            .unwrap()
            .unwrap();
    }
}

#[tokio::test]
async fn connect_is_followed_by_refreshes() {
    let wallet = SandboxWallet::default();
    let mut h = spawn(&wallet);
    h.req_tx.send(LedgerRequest::Connect).unwrap();

    assert!(matches!(
        h.next().await,
        LedgerEvent::Connected { resumed: false, .. }
    ));
    assert_eq!(h.next().await, LedgerEvent::BestScore(Ok(0)));
    assert_eq!(h.next().await, LedgerEvent::TopCount(10));
    assert_eq!(h.next().await, LedgerEvent::Leaderboard(Ok(Vec::new())));
    h.finish().await;
}

#[tokio::test]
async fn reconnect_without_authorization_reports_no_session() {
    let wallet = SandboxWallet::default();
    let mut h = spawn(&wallet);
    h.req_tx.send(LedgerRequest::Reconnect).unwrap();
    assert_eq!(h.next().await, LedgerEvent::NoSession);
    h.finish().await;
}

#[tokio::test]
async fn submission_completes_before_refresh() {
    let wallet = SandboxWallet::new(SandboxOptions {
        authorized: true,
        confirm_after_polls: 2,
        ..SandboxOptions::default()
    });
    let mut h = spawn(&wallet);
    h.req_tx.send(LedgerRequest::Reconnect).unwrap();
    // Queued right behind the reconnect; runs after its refreshes.
    h.req_tx.send(LedgerRequest::SubmitScore { score: 9920 }).unwrap();

    assert!(matches!(
        h.next().await,
        LedgerEvent::Connected { resumed: true, .. }
    ));
    assert_eq!(h.next().await, LedgerEvent::BestScore(Ok(0)));
    assert_eq!(h.next().await, LedgerEvent::TopCount(10));
    assert_eq!(h.next().await, LedgerEvent::Leaderboard(Ok(Vec::new())));

    let tx_hash = match h.next().await {
        LedgerEvent::SubmissionPending { tx_hash, score } => {
            assert_eq!(score, 9920);
            tx_hash
        }
        other => panic!("expected SubmissionPending, got {other:?}"),
    };
    match h.next().await {
        LedgerEvent::SubmissionConfirmed(c) => {
            assert_eq!(c.tx_hash, tx_hash);
            assert!(c.leaderboard_updated);
        }
        other => panic!("expected SubmissionConfirmed, got {other:?}"),
    }
    assert_eq!(h.next().await, LedgerEvent::BestScore(Ok(9920)));
    match h.next().await {
        LedgerEvent::Leaderboard(Ok(rows)) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].score, 9920);
        }
        other => panic!("expected leaderboard, got {other:?}"),
    }
    h.finish().await;
}

#[tokio::test]
async fn failed_submission_skips_refresh() {
    let wallet = SandboxWallet::default();
    let mut h = spawn(&wallet);
    h.req_tx.send(LedgerRequest::Connect).unwrap();
    for _ in 0..4 {
        h.next().await;
    }

    wallet.revert_next_submission();
    h.req_tx.send(LedgerRequest::SubmitScore { score: 10 }).unwrap();
    h.req_tx.send(LedgerRequest::RefreshBestScore).unwrap();

    assert!(matches!(h.next().await, LedgerEvent::SubmissionPending { .. }));
    assert!(matches!(
        h.next().await,
        LedgerEvent::SubmissionFailed(LedgerError::SubmissionFailed(_))
    ));
    // The next event is the explicitly requested refresh.
    assert_eq!(h.next().await, LedgerEvent::BestScore(Ok(0)));
    h.finish().await;
}

#[tokio::test]
async fn submit_without_session_fails() {
    let wallet = SandboxWallet::default();
    let mut h = spawn(&wallet);
    h.req_tx.send(LedgerRequest::SubmitScore { score: 1 }).unwrap();
    assert!(matches!(h.next().await, LedgerEvent::SubmissionFailed(_)));
    h.finish().await;
}

#[tokio::test]
async fn rejected_connect_reports_user_rejection() {
    let wallet = SandboxWallet::default();
    wallet.set_reject_authorization(true);
    let mut h = spawn(&wallet);
    h.req_tx.send(LedgerRequest::Connect).unwrap();
    assert!(matches!(
        h.next().await,
        LedgerEvent::ConnectFailed {
            error: LedgerError::UserRejected(_),
            resumed: false
        }
    ));
    h.finish().await;
}

#[test]
fn runtime_bridge_delivers_events_to_sync_loop() {
    let wallet = SandboxWallet::default();
    let client = LedgerClient::new(wallet.clone(), wallet.contract());
    let mut rt = LedgerRuntime::start(client).unwrap();
    rt.send(LedgerRequest::Connect);

    let mut events = Vec::new();
    for _ in 0..400 {
        while let Some(ev) = rt.try_recv() {
            events.push(ev);
        }
        if events.len() >= 4 {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(matches!(events.first(), Some(LedgerEvent::Connected { .. })));
    assert!(matches!(events.last(), Some(LedgerEvent::Leaderboard(Ok(_)))));
    rt.shutdown();
}
