//! Key mapping from terminal events to commands.

use crate::types::{Command, Direction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map one key event to a command.
///
/// Releases are ignored. Auto-repeat is accepted so a held arrow keeps
/// moving the piece.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if is_quit(key) {
        return Some(Command::Quit);
    }

    match key.code {
        // Movement
        KeyCode::Left => Some(Command::Move(Direction::Left)),
        KeyCode::Right => Some(Command::Move(Direction::Right)),
        KeyCode::Down => Some(Command::Move(Direction::Down)),

        // Rotation
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Command::Move(Direction::RotateLeft)),
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => {
            Some(Command::Move(Direction::RotateRight))
        }

        // Session
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::Start),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn is_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
