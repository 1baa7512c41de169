//! Terminal rendering for blockfall.
//!
//! A round is drawn into a [`FrameBuffer`] by [`GameView`] (pure, testable) and the
//! buffer is flushed by [`TerminalRenderer`], which owns every escape sequence and
//! the raw-mode / alternate-screen lifecycle.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{kind_color, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
