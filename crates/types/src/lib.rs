//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (board engine, ledger client, terminal rendering).
//!
//! # Board Dimensions
//!
//! The deck holds two copies of each of the 8 symbols, laid out on a 4x4 grid:
//!
//! - **Symbols**: 8 (indexed 0-7)
//! - **Deck**: 16 cards (indexed 0-15, row-major)
//! - **Grid**: 4 columns by 4 rows
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `SECOND_MS` | 1000 | Game timer period |
//! | `MISMATCH_DELAY_MS` | 1000 | How long a mismatched pair stays face up |
//! | `NOTICE_TTL_MS` | 5000 | Lifetime of a transient notification |
//!
//! # Score Formula
//!
//! `max(0, MAX_SCORE - moves * MOVE_PENALTY - seconds * SECOND_PENALTY)`
//!
//! # Examples
//!
//! ```
//! use memo_match_types::{GameAction, Symbol, DECK_SIZE, SYMBOL_COUNT};
//!
//! assert_eq!(DECK_SIZE, 2 * SYMBOL_COUNT);
//! assert_eq!(Symbol::ALL.len(), SYMBOL_COUNT);
//! assert_eq!(Symbol::Dice.as_str(), "dice");
//! assert_eq!(GameAction::NewGame.as_str(), "newGame");
//! ```

/// Number of distinct card symbols
pub const SYMBOL_COUNT: usize = 8;

/// Cards on the board (each symbol appears exactly twice)
pub const DECK_SIZE: usize = SYMBOL_COUNT * 2;

/// Grid columns
pub const BOARD_COLS: usize = 4;

/// Grid rows
pub const BOARD_ROWS: usize = DECK_SIZE / BOARD_COLS;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Game timer period (one `elapsed_seconds` increment)
pub const SECOND_MS: u32 = 1000;

/// Visible delay before a mismatched pair is turned face down again
pub const MISMATCH_DELAY_MS: u32 = 1000;

/// Lifetime of a transient notification
pub const NOTICE_TTL_MS: u32 = 5000;

/// Score awarded for a zero-move, zero-second game
pub const MAX_SCORE: u32 = 10_000;

/// Points deducted per move (a move is one revealed pair)
pub const MOVE_PENALTY: u32 = 10;

/// Points deducted per elapsed second
pub const SECOND_PENALTY: u32 = 5;


/// The eight card symbols
///
/// Each symbol has a reference emoji (used in logs) and a single-column glyph
/// for terminal cells, where emoji widths are unreliable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Gamepad,
    Target,
    Dice,
    Circus,
    Palette,
    Masks,
    Clapper,
    Guitar,
}

impl Symbol {
    /// All symbols in identifier order
    pub const ALL: [Symbol; SYMBOL_COUNT] = [
        Symbol::Gamepad,
        Symbol::Target,
        Symbol::Dice,
        Symbol::Circus,
        Symbol::Palette,
        Symbol::Masks,
        Symbol::Clapper,
        Symbol::Guitar,
    ];

    /// Stable identifier (0-7)
    pub fn index(&self) -> usize {
        match self {
            Symbol::Gamepad => 0,
            Symbol::Target => 1,
            Symbol::Dice => 2,
            Symbol::Circus => 3,
            Symbol::Palette => 4,
            Symbol::Masks => 5,
            Symbol::Clapper => 6,
            Symbol::Guitar => 7,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Gamepad => "gamepad",
            Symbol::Target => "target",
            Symbol::Dice => "dice",
            Symbol::Circus => "circus",
            Symbol::Palette => "palette",
            Symbol::Masks => "masks",
            Symbol::Clapper => "clapper",
            Symbol::Guitar => "guitar",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Symbol::Gamepad => "🎮",
            Symbol::Target => "🎯",
            Symbol::Dice => "🎲",
            Symbol::Circus => "🎪",
            Symbol::Palette => "🎨",
            Symbol::Masks => "🎭",
            Symbol::Clapper => "🎬",
            Symbol::Guitar => "🎸",
        }
    }

    /// Single-column glyph for terminal rendering
    pub fn glyph(&self) -> char {
        match self {
            Symbol::Gamepad => '♣',
            Symbol::Target => '◎',
            Symbol::Dice => '♦',
            Symbol::Circus => '▲',
            Symbol::Palette => '♥',
            Symbol::Masks => '☻',
            Symbol::Clapper => '■',
            Symbol::Guitar => '♪',
        }
    }
}

/// Face of a single card
///
/// - **Hidden**: face down, can be flipped
/// - **Revealed**: face up, part of the pair currently being evaluated
/// - **Matched**: paired with its twin, stays face up until the next game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardFace {
    #[default]
    Hidden,
    Revealed,
    Matched,
}

/// Lifecycle of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    /// No game has been dealt yet
    #[default]
    Idle,
    /// Accepting flips, timer live
    Running,
    /// All pairs matched, timer stopped, score final
    Ended,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Running => "running",
            GamePhase::Ended => "ended",
        }
    }
}

/// Cursor movement on the 4x4 grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// User intents forwarded into the controller
///
/// These actions are produced by the input layer and consumed by the
/// application controller, which turns them into board operations or
/// ledger requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the selection cursor one cell
    MoveCursor(Direction),
    /// Flip the card under the cursor
    Flip,
    /// Flip the card at a board index
    FlipAt(usize),
    /// Deal a fresh shuffled deck and restart the timer
    NewGame,
    /// Request account authorization from the wallet
    ConnectWallet,
    /// Record the finished game's score on the ledger
    SubmitScore,
    /// Re-read the connected account's best score
    RefreshBestScore,
    /// Re-read the top-N leaderboard
    RefreshLeaderboard,
}

impl GameAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveCursor(_) => "moveCursor",
            GameAction::Flip => "flip",
            GameAction::FlipAt(_) => "flipAt",
            GameAction::NewGame => "newGame",
            GameAction::ConnectWallet => "connectWallet",
            GameAction::SubmitScore => "submitScore",
            GameAction::RefreshBestScore => "refreshBestScore",
            GameAction::RefreshLeaderboard => "refreshLeaderboard",
        }
    }
}

/// Severity of a transient user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
        }
    }
}
