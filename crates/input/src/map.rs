//! Key mapping from terminal events to front-end commands.

use crate::types::{GameMode, GuessKind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Something the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Zero-based pile index.
    SelectPile(usize),
    Unselect,
    /// Guess against the currently selected pile.
    Guess(GuessKind),
    /// `None` keeps the current mode.
    NewRound(Option<GameMode>),
    EndZen,
    ToggleStats,
}

/// Map keyboard input to commands.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Piles
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10)? as usize - 1;
            Some(Command::SelectPile(index))
        }
        KeyCode::Esc => Some(Command::Unselect),

        // Guesses
        KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(Command::Guess(GuessKind::Higher))
        }
        KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(Command::Guess(GuessKind::Lower))
        }
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('=') => {
            Some(Command::Guess(GuessKind::Same))
        }

        // Rounds
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Command::NewRound(None)),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::NewRound(Some(GameMode::Casual))),
        KeyCode::Char('t') | KeyCode::Char('T') => {
            Some(Command::NewRound(Some(GameMode::Standard)))
        }
        KeyCode::Char('b') | KeyCode::Char('B') => Some(Command::NewRound(Some(GameMode::Brutal))),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Command::NewRound(Some(GameMode::Zen))),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(Command::EndZen),

        KeyCode::Char('i') | KeyCode::Char('I') => Some(Command::ToggleStats),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
