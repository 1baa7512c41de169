//! Terminal input mapping.
//!
//! Maps `crossterm` key events to [`crate::types::Command`]s and to the answers of
//! the end-of-round prompt. There is no timing here: each key press is one command.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, prompt_choice, should_quit, PromptChoice};
