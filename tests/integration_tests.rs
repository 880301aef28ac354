//! Integration tests for the board engine and score calculator

use memo_match::core::{calculate_score, FlipOutcome, FlipRejection, GameState};
use memo_match::types::{CardFace, GamePhase, DECK_SIZE, MISMATCH_DELAY_MS, SYMBOL_COUNT, TICK_MS};

fn started(seed: u32) -> GameState {
    let mut state = GameState::new(seed);
    state.new_game();
    state
}

/// Index pairs `(a, b)` with the same symbol, in board order.
fn pairs(state: &GameState) -> Vec<(usize, usize)> {
    let mut seen = [false; DECK_SIZE];
    let mut out = Vec::new();
    for i in 0..DECK_SIZE {
        if seen[i] {
            continue;
        }
        let twin = state.board().twin_of(i).unwrap();
        seen[i] = true;
        seen[twin] = true;
        out.push((i, twin));
    }
    out
}

fn mismatched_pair(state: &GameState) -> (usize, usize) {
    let cards = state.board().cards();
    let b = (1..DECK_SIZE)
        .find(|&j| cards[j].symbol != cards[0].symbol)
        .unwrap();
    (0, b)
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert_eq!(state.phase(), GamePhase::Idle);
    assert_eq!(
        state.flip(0),
        FlipOutcome::Ignored(FlipRejection::NotRunning)
    );

    state.new_game();
    assert_eq!(state.phase(), GamePhase::Running);
    assert_eq!(state.moves(), 0);
    assert_eq!(state.elapsed_seconds(), 0);
    assert_eq!(state.matched_pairs(), 0);
    assert!(state.timer_live());
}

#[test]
fn test_full_game_perfect_play_scores_9920() {
    let mut state = started(42);
    let mut completed = 0;
    let mut last = FlipOutcome::Ignored(FlipRejection::NotRunning);

    for (a, b) in pairs(&state) {
        assert_eq!(state.flip(a), FlipOutcome::Revealed { index: a });
        last = state.flip(b);
        if matches!(last, FlipOutcome::Completed { .. }) {
            completed += 1;
        }
    }

    assert_eq!(completed, 1);
    assert!(matches!(last, FlipOutcome::Completed { score: 9920, .. }));
    assert_eq!(state.phase(), GamePhase::Ended);
    assert_eq!(state.moves(), SYMBOL_COUNT as u32);
    assert_eq!(state.matched_pairs(), SYMBOL_COUNT as u32);
    assert_eq!(state.final_score(), Some(9920));
    assert!(!state.timer_live());
    assert_eq!(state.board().count(CardFace::Matched), DECK_SIZE);
}

#[test]
fn test_mismatch_then_match() {
    let mut state = started(7);
    let (a, b) = mismatched_pair(&state);

    state.flip(a);
    assert_eq!(state.flip(b), FlipOutcome::Mismatched { first: a, second: b });
    assert_eq!(state.moves(), 1);

    // Third flip while the pair is showing is ignored, not queued.
    let third = (0..DECK_SIZE).find(|&i| i != a && i != b).unwrap();
    assert_eq!(
        state.flip(third),
        FlipOutcome::Ignored(FlipRejection::PairPending)
    );

    let mut elapsed = 0;
    let mut hidden = None;
    while hidden.is_none() {
        let report = state.tick(TICK_MS);
        elapsed += TICK_MS;
        hidden = report.hidden_pair;
    }
    assert!(elapsed >= MISMATCH_DELAY_MS);
    assert_eq!(hidden, Some([a, b]));
    assert!(state.board().cards()[a].is_hidden());
    assert!(state.board().cards()[b].is_hidden());
    assert_eq!(state.moves(), 1);

    // Now match the first card with its twin.
    let twin = state.board().twin_of(a).unwrap();
    state.flip(a);
    assert!(matches!(state.flip(twin), FlipOutcome::Matched { .. }));
    assert_eq!(state.moves(), 2);
    assert_eq!(state.matched_pairs(), 1);
}

#[test]
fn test_flip_on_matched_card_is_noop() {
    let mut state = started(9);
    let (a, b) = pairs(&state)[0];
    state.flip(a);
    state.flip(b);
    let before = state.snapshot();

    assert_eq!(
        state.flip(a),
        FlipOutcome::Ignored(FlipRejection::AlreadyMatched)
    );
    assert_eq!(state.snapshot(), before);
}

#[test]
fn test_time_penalty_applies() {
    let mut state = started(11);
    // 3 seconds of play before the first flip.
    for _ in 0..3 {
        state.tick(1000);
    }
    let mut score = 0;
    for (a, b) in pairs(&state) {
        state.flip(a);
        if let FlipOutcome::Completed { score: s, .. } = state.flip(b) {
            score = s;
        }
    }
    assert_eq!(state.elapsed_seconds(), 3);
    assert_eq!(score, calculate_score(8, 3));
    assert_eq!(score, 10000 - 80 - 15);
}

#[test]
fn test_timer_stops_at_end() {
    let mut state = started(5);
    for (a, b) in pairs(&state) {
        state.flip(a);
        state.flip(b);
    }
    let seconds = state.elapsed_seconds();
    for _ in 0..10 {
        state.tick(1000);
    }
    assert_eq!(state.elapsed_seconds(), seconds);
    assert_eq!(state.live_timer_count(), 0);
}

#[test]
fn test_restart_mid_game_keeps_one_timer() {
    let mut state = started(3);
    let (a, b) = mismatched_pair(&state);
    state.flip(a);
    state.flip(b);
    state.tick(500);

    state.new_game();
    state.new_game();
    assert_eq!(state.live_timer_count(), 1);
    assert_eq!(state.moves(), 0);
    assert!(!state.pair_pending());
    assert_eq!(state.board().count(CardFace::Hidden), DECK_SIZE);
    assert_eq!(state.game_id(), 3);
}

#[test]
fn test_same_seed_same_deal() {
    let a = started(2024);
    let b = started(2024);
    assert_eq!(a.board(), b.board());
}
