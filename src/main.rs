//! Terminal memory-matching game (default binary).
//!
//! Runs the board at a fixed tick, renders with the framebuffer renderer and
//! talks to the score contract through a background ledger worker.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing_subscriber::EnvFilter;

use memo_match::app::App;
use memo_match::core::GameSnapshot;
use memo_match::input::{handle_key_event, should_quit};
use memo_match::ledger::{
    LedgerClient, LedgerConfig, LedgerRuntime, SandboxWallet, TcpWalletProvider, WalletEndpoint,
};
use memo_match::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use memo_match::types::TICK_MS;

fn main() -> Result<()> {
    init_logging()?;

    let config = LedgerConfig::from_env();
    let seed = seed_from_env();
    tracing::info!(
        wallet = %config.wallet.describe(),
        contract = %config.contract,
        seed,
        "starting memo-match"
    );

    let mut ledger = start_ledger(&config)?;
    let mut app = App::new(seed, config.contract);
    app.resume_session();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app, &mut ledger);

    // Always try to restore terminal state.
    let _ = term.exit();
    ledger.shutdown();
    result
}

/// Log to `MEMO_MATCH_LOG_PATH` when set; the terminal belongs to the renderer.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var("MEMO_MATCH_LOG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("cannot open log file {path}"))?;
    let filter = EnvFilter::try_from_env("MEMO_MATCH_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn seed_from_env() -> u32 {
    if let Some(seed) = std::env::var("MEMO_MATCH_SEED")
        .ok()
        .and_then(|s| s.trim().parse().ok())
    {
        return seed;
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn start_ledger(config: &LedgerConfig) -> Result<LedgerRuntime> {
    match &config.wallet {
        WalletEndpoint::Tcp { host, port } => {
            let provider = TcpWalletProvider::new(host.clone(), *port);
            LedgerRuntime::start(LedgerClient::from_config(provider, config))
        }
        WalletEndpoint::Sandbox => {
            let wallet = SandboxWallet::default();
            LedgerRuntime::start(LedgerClient::from_config(wallet, config))
        }
    }
}

fn run(term: &mut TerminalRenderer, app: &mut App, ledger: &mut LedgerRuntime) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        while let Some(ev) = ledger.try_recv() {
            app.apply_ledger_event(ev);
        }
        for req in app.take_requests() {
            ledger.send(req);
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.snapshot_into(&mut snap);
        view.render_into(app, &snap, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        app.handle_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        while last_tick.elapsed() >= tick_duration {
            last_tick += tick_duration;
            app.tick(TICK_MS);
        }
    }
}
