//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Key release
//! events are dropped so terminals that report them do not double-flip.

pub mod map;

pub use memo_match_types as types;

pub use map::{handle_key_event, should_quit};
