//! Scoring module - final score from moves and elapsed time
//!
//! `score = max(0, 10000 - moves * 10 - seconds * 5)`
//!
//! Fewer moves and less time give a higher score. The result floors at zero
//! and the arithmetic is widened so no input can overflow.

use crate::types::{MAX_SCORE, MOVE_PENALTY, SECOND_PENALTY};

/// Score with its individual deductions (for display)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    pub base: u32,
    /// `moves * MOVE_PENALTY`, saturated to `u32::MAX`.
    pub move_penalty: u32,
    /// `seconds * SECOND_PENALTY`, saturated to `u32::MAX`.
    pub time_penalty: u32,
    pub total: u32,
}

/// Calculate the score for a game.
pub fn calculate_score(moves: u32, elapsed_seconds: u32) -> u32 {
    score_breakdown(moves, elapsed_seconds).total
}

/// Calculate the score together with its deductions.
pub fn score_breakdown(moves: u32, elapsed_seconds: u32) -> ScoreBreakdown {
    let move_penalty = (moves as u64) * (MOVE_PENALTY as u64);
    let time_penalty = (elapsed_seconds as u64) * (SECOND_PENALTY as u64);
    let total = (MAX_SCORE as u64).saturating_sub(move_penalty + time_penalty);

    ScoreBreakdown {
        base: MAX_SCORE,
        move_penalty: move_penalty.min(u32::MAX as u64) as u32,
        time_penalty: time_penalty.min(u32::MAX as u64) as u32,
        total: total as u32,
    }
}
