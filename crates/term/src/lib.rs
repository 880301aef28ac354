//! Terminal front end.
//!
//! Renders the application state into a simple framebuffer that is diffed
//! and flushed to the terminal with crossterm. No widget toolkit.
//!
//! - [`fb`]: styled character cells
//! - [`game_view`]: card grid, side panel, overlay and notifications (pure)
//! - [`renderer`]: framebuffer to terminal

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use memo_match_app as app;
pub use memo_match_core as core;
pub use memo_match_app::ledger;
pub use memo_match_types as types;

pub use fb::{palette, Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
