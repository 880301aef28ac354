//! Key mapping from terminal events to game actions.

use crate::types::{Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(GameAction::MoveCursor(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(GameAction::MoveCursor(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(GameAction::MoveCursor(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(GameAction::MoveCursor(Direction::Down))
        }

        // Board
        KeyCode::Char(' ') | KeyCode::Enter => Some(GameAction::Flip),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(GameAction::NewGame),

        // Ledger
        KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::ConnectWallet),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::SubmitScore),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(GameAction::RefreshBestScore),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::RefreshLeaderboard),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
