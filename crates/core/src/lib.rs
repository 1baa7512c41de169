//! Core rules engine - pure, synchronous and testable
//!
//! This crate holds every game rule and no I/O. Rendering, key handling and timing
//! live in the collaborator crates and only talk to [`Round`] through commands and
//! read-only queries.
//!
//! # Module Structure
//!
//! - [`board`]: 20x10 field with bounds checks and atomic multi-row clearing
//! - [`piece`]: piece masks, translation and kick-resolved rotation
//! - [`kicks`]: SRS wall kick tables keyed by kind class, direction and state
//! - [`bag`]: seeded 7-bag randomizer with lookahead
//! - [`round`]: spawn / command / lock / clear / hold / game-over controller
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Phase, Round};
//! use blockfall_types::Command;
//!
//! let mut round = Round::with_seed(12345);
//! assert_eq!(round.start_round(), Phase::Active);
//!
//! round.command(Command::MoveLeft);
//! round.command(Command::RotateCw);
//! let outcome = round.command(Command::HardDrop);
//!
//! assert!(outcome.accepted);
//! assert_eq!(outcome.lines_cleared, 0);
//! assert_eq!(round.pieces_locked(), 1);
//! ```

pub mod bag;
pub mod board;
pub mod kicks;
pub mod piece;
pub mod round;

pub use blockfall_types as types;

pub use bag::Bag;
pub use board::{Board, BoardLayoutError};
pub use piece::Piece;
pub use round::{Phase, Round};
