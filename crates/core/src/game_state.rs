//! Game state module - the flip/match state machine
//!
//! This module ties together the board, the shuffling RNG and scoring.
//! It handles the game timer, the mismatch delay, move counting and the game
//! lifecycle. Time only advances through [`GameState::tick`], so a game is
//! fully deterministic for a given seed and input sequence.

use arrayvec::ArrayVec;

use crate::{calculate_score, shuffled_deck, Board, SimpleRng};
use crate::types::*;

/// Why a flip request was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipRejection {
    /// No game running (idle or ended)
    NotRunning,
    /// Index outside the deck
    OutOfRange,
    /// Card is already face up in the current pair
    AlreadyRevealed,
    /// Card was already matched
    AlreadyMatched,
    /// Two cards are face up; wait for the pair to resolve
    PairPending,
}

/// Result of a flip request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Nothing changed
    Ignored(FlipRejection),
    /// First card of a pair turned face up
    Revealed { index: usize },
    /// Second card matched the first
    Matched {
        first: usize,
        second: usize,
        symbol: Symbol,
    },
    /// Second card differs; both turn back after [`MISMATCH_DELAY_MS`]
    Mismatched { first: usize, second: usize },
    /// Last pair matched; the game is over
    Completed {
        first: usize,
        second: usize,
        score: u32,
    },
}

impl FlipOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, FlipOutcome::Ignored(_))
    }
}

/// What a tick advanced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Whole seconds added to the game timer
    pub seconds: u32,
    /// Mismatched pair turned face down during this tick
    pub hidden_pair: Option<[usize; 2]>,
}

/// The one-second game timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct SecondTimer {
    accum_ms: u32,
}

/// A mismatched pair waiting to be turned back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingHide {
    cards: [usize; 2],
    remaining_ms: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    phase: GamePhase,
    rng: SimpleRng,
    /// Face-up cards of the pair in progress (at most two).
    revealed: ArrayVec<usize, 2>,
    pending_hide: Option<PendingHide>,
    /// Live game timer. `Some` only while running.
    timer: Option<SecondTimer>,
    moves: u32,
    elapsed_seconds: u32,
    matched_pairs: u32,
    /// Monotonic game id (increments on every deal).
    game_id: u32,
    final_score: Option<u32>,
    /// Timers started over the lifetime of this state.
    timer_starts: u32,
    /// Timers stopped over the lifetime of this state.
    timer_stops: u32,
}

impl GameState {
    /// Create an idle game with the given RNG seed
    ///
    /// The board is laid out face down in identifier order until
    /// [`new_game`](Self::new_game) deals a shuffled deck.
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::default(),
            phase: GamePhase::Idle,
            rng: SimpleRng::new(seed),
            revealed: ArrayVec::new(),
            pending_hide: None,
            timer: None,
            moves: 0,
            elapsed_seconds: 0,
            matched_pairs: 0,
            game_id: 0,
            final_score: None,
            timer_starts: 0,
            timer_stops: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_ended(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    /// Cards currently face up in the pair being evaluated
    pub fn revealed(&self) -> &[usize] {
        &self.revealed
    }

    /// True while a mismatched pair is waiting to turn back
    pub fn pair_pending(&self) -> bool {
        self.pending_hide.is_some()
    }

    pub fn timer_live(&self) -> bool {
        self.timer.is_some()
    }

    /// Number of live timers minus stopped ones: 0 or 1.
    pub fn live_timer_count(&self) -> u32 {
        self.timer_starts - self.timer_stops
    }

    /// Score for the counters so far
    pub fn score(&self) -> u32 {
        calculate_score(self.moves, self.elapsed_seconds)
    }

    /// Score fixed when the last pair matched
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn snapshot_into(&self, out: &mut crate::snapshot::GameSnapshot) {
        out.cards = *self.board.cards();
        out.phase = self.phase;
        out.moves = self.moves;
        out.elapsed_seconds = self.elapsed_seconds;
        out.matched_pairs = self.matched_pairs;
        out.game_id = self.game_id;
        out.score = self.score();
        out.final_score = self.final_score;
        out.pair_pending = self.pending_hide.is_some();
        out.timer_live = self.timer.is_some();
    }

    pub fn snapshot(&self) -> crate::snapshot::GameSnapshot {
        let mut s = crate::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Deal a shuffled deck and start a new game
    ///
    /// Resets all counters and restarts the timer. Calling this mid-game
    /// abandons the current game, including any pending mismatch.
    pub fn new_game(&mut self) {
        let deck = shuffled_deck(&mut self.rng);
        self.board = Board::from_deck(deck);
        self.revealed.clear();
        self.pending_hide = None;
        self.moves = 0;
        self.elapsed_seconds = 0;
        self.matched_pairs = 0;
        self.final_score = None;
        self.game_id = self.game_id.wrapping_add(1);
        self.phase = GamePhase::Running;

        self.stop_timer();
        self.start_timer();
    }

    fn start_timer(&mut self) {
        debug_assert!(self.timer.is_none());
        self.timer = Some(SecondTimer::default());
        self.timer_starts += 1;
    }

    fn stop_timer(&mut self) {
        if self.timer.take().is_some() {
            self.timer_stops += 1;
        }
    }

    /// Flip the card at `index`
    ///
    /// Invalid requests leave the state untouched and report why.
    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if self.phase != GamePhase::Running {
            return FlipOutcome::Ignored(FlipRejection::NotRunning);
        }
        let Some(card) = self.board.get(index) else {
            return FlipOutcome::Ignored(FlipRejection::OutOfRange);
        };
        match card.face {
            CardFace::Matched => return FlipOutcome::Ignored(FlipRejection::AlreadyMatched),
            CardFace::Revealed => return FlipOutcome::Ignored(FlipRejection::AlreadyRevealed),
            CardFace::Hidden => {}
        }
        if self.revealed.is_full() {
            return FlipOutcome::Ignored(FlipRejection::PairPending);
        }

        self.board.set_face(index, CardFace::Revealed);
        self.revealed.push(index);

        if !self.revealed.is_full() {
            return FlipOutcome::Revealed { index };
        }

        self.moves = self.moves.saturating_add(1);
        self.evaluate_pair()
    }

    fn evaluate_pair(&mut self) -> FlipOutcome {
        let (first, second) = (self.revealed[0], self.revealed[1]);
        let a = self.board.cards()[first].symbol;
        let b = self.board.cards()[second].symbol;

        if a != b {
            self.pending_hide = Some(PendingHide {
                cards: [first, second],
                remaining_ms: MISMATCH_DELAY_MS,
            });
            return FlipOutcome::Mismatched { first, second };
        }

        self.board.set_face(first, CardFace::Matched);
        self.board.set_face(second, CardFace::Matched);
        self.revealed.clear();
        self.matched_pairs += 1;

        if self.matched_pairs as usize == SYMBOL_COUNT {
            let score = self.finish();
            return FlipOutcome::Completed {
                first,
                second,
                score,
            };
        }

        FlipOutcome::Matched {
            first,
            second,
            symbol: a,
        }
    }

    fn finish(&mut self) -> u32 {
        self.phase = GamePhase::Ended;
        self.stop_timer();
        let score = calculate_score(self.moves, self.elapsed_seconds);
        self.final_score = Some(score);
        score
    }

    /// Advance game time by `elapsed_ms`
    ///
    /// Drives the one-second timer and the mismatch delay. Does nothing
    /// unless a game is running.
    pub fn tick(&mut self, elapsed_ms: u32) -> TickReport {
        let mut report = TickReport::default();
        if self.phase != GamePhase::Running {
            return report;
        }

        if let Some(timer) = self.timer.as_mut() {
            timer.accum_ms = timer.accum_ms.saturating_add(elapsed_ms);
            while timer.accum_ms >= SECOND_MS {
                timer.accum_ms -= SECOND_MS;
                self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
                report.seconds += 1;
            }
        }

        if let Some(pending) = self.pending_hide.as_mut() {
            pending.remaining_ms = pending.remaining_ms.saturating_sub(elapsed_ms);
            if pending.remaining_ms == 0 {
                let cards = pending.cards;
                for &i in &cards {
                    self.board.set_face(i, CardFace::Hidden);
                }
                self.revealed.clear();
                self.pending_hide = None;
                report.hidden_pair = Some(cards);
            }
        }

        report
    }
}
