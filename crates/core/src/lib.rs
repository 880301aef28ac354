//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the board engine and the score calculator.
//! It has **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed deals identical decks (for tests and replays)
//! - **Testable**: Every flip returns an explicit outcome, including rejections
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 16 cards on a 4x4 grid
//! - [`game_state`]: flip/match state machine, move counter, game timer
//! - [`rng`]: seeded Fisher-Yates deck shuffling
//! - [`scoring`]: `max(0, 10000 - moves*10 - seconds*5)`
//! - [`snapshot`]: copyable view of the game for renderers
//!
//! # Game Rules
//!
//! - A deck holds each of the 8 symbols exactly twice
//! - At most two cards are face up at once; flipping a second card is one move
//! - A matching pair stays face up; a mismatched pair turns back after 1 second
//! - Flips are ignored while a mismatched pair is still showing
//! - The game ends when all 8 pairs are matched, fixing the score
//!
//! # Example
//!
//! ```
//! use memo_match_core::{FlipOutcome, GameState};
//!
//! let mut game = GameState::new(12345);
//! game.new_game();
//!
//! // The first flip of a pair only reveals the card.
//! assert_eq!(game.flip(0), FlipOutcome::Revealed { index: 0 });
//! assert_eq!(game.moves(), 0);
//!
//! // Flipping its twin completes a pair and counts one move.
//! let twin = game.board().twin_of(0).unwrap();
//! assert!(matches!(game.flip(twin), FlipOutcome::Matched { .. }));
//! assert_eq!(game.moves(), 1);
//! ```
//!
//! # Timing
//!
//! The game uses a fixed timestep:
//! - **Tick Rate**: 16ms (approximately 60 FPS)
//! - **Game Timer**: one `elapsed_seconds` increment per 1000ms while running
//! - **Mismatch Delay**: 1000ms before a mismatched pair turns back
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with elapsed time.

pub mod board;
pub mod game_state;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use memo_match_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Card};
pub use game_state::{FlipOutcome, FlipRejection, GameState, TickReport};
pub use rng::{ordered_deck, shuffled_deck, SimpleRng};
pub use scoring::{calculate_score, score_breakdown, ScoreBreakdown};
pub use snapshot::GameSnapshot;
