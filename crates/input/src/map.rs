//! Key mapping from terminal events to round commands.
//!
//! | keys | command |
//! |------|---------|
//! | `←` `h` | move left |
//! | `→` `l` | move right |
//! | `↓` `j` | soft drop |
//! | `Space` `J` | hard drop |
//! | `↑` `f` `x` | rotate clockwise |
//! | `d` `Z` | rotate counter-clockwise |
//! | `z` `c` | hold |

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to round commands.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::SoftDrop),
        KeyCode::Char(' ') | KeyCode::Char('J') => Some(Command::HardDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('f') | KeyCode::Char('x') => Some(Command::RotateCw),
        KeyCode::Char('d') | KeyCode::Char('Z') => Some(Command::RotateCcw),

        KeyCode::Char('z') | KeyCode::Char('c') => Some(Command::Hold),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Answer to the "[R]eplay / [Q]uit" prompt shown after a game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    Replay,
    Quit,
}

/// Map a key press at the end-of-round prompt; other keys are ignored.
pub fn prompt_choice(key: KeyEvent) -> Option<PromptChoice> {
    if should_quit(key) {
        return Some(PromptChoice::Quit);
    }
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(PromptChoice::Replay),
        _ => None,
    }
}
