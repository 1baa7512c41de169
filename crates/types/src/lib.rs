//! Shared types and constants for the blockfall workspace.
//!
//! Everything here is plain data with no dependencies, so the same definitions
//! can be used by the rules engine, the input mapper and the terminal renderer.
//!
//! # Board Dimensions
//!
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Spawn anchor**: row 0, column 3 (top-left corner of the 4x4 piece frame)
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, BOARD_COLUMNS, BOARD_ROWS};
//!
//! let kind = PieceKind::try_from('t').unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.symbol(), 'T');
//!
//! assert_eq!(Command::from_str("rotateCw"), Some(Command::RotateCw));
//!
//! assert_eq!(BOARD_ROWS, 20);
//! assert_eq!(BOARD_COLUMNS, 10);
//! ```

use std::fmt;

/// Visible board height in rows.
pub const BOARD_ROWS: usize = 20;

/// Visible board width in columns.
pub const BOARD_COLUMNS: usize = 10;

/// Anchor row of a freshly spawned piece.
pub const SPAWN_ROW: i8 = 0;

/// Anchor column of a freshly spawned piece (for a 10-wide board).
pub const SPAWN_COLUMN: i8 = 3;

/// Number of upcoming kinds shown by default in the next queue.
pub const DEFAULT_PREVIEW: usize = 3;

/// The seven piece kinds.
///
/// - **I**: cyan bar
/// - **J**: blue, hook on the left
/// - **L**: orange, hook on the right
/// - **O**: yellow square
/// - **S**: green
/// - **Z**: red (mirror of S)
/// - **T**: magenta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

impl PieceKind {
    /// All kinds in canonical bag order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Parse from a string (case-insensitive).
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c).ok(),
            _ => None,
        }
    }

    /// Upper-case symbol used for display.
    pub fn symbol(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::T => 'T',
        }
    }
}

impl TryFrom<char> for PieceKind {
    type Error = InvalidPieceKind;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'I' => Ok(PieceKind::I),
            'J' => Ok(PieceKind::J),
            'L' => Ok(PieceKind::L),
            'O' => Ok(PieceKind::O),
            'S' => Ok(PieceKind::S),
            'Z' => Ok(PieceKind::Z),
            'T' => Ok(PieceKind::T),
            _ => Err(InvalidPieceKind(c)),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A symbol that does not name one of the seven kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPieceKind(pub char);

impl fmt::Display for InvalidPieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid piece kind {:?}", self.0)
    }
}

impl std::error::Error for InvalidPieceKind {}

/// A board cell: `None` is empty, `Some(kind)` is a locked block of that kind.
pub type Cell = Option<PieceKind>;

/// Rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Rotation state reached from `state` (0..=3) in this direction.
    ///
    /// ```
    /// use blockfall_types::Direction;
    ///
    /// assert_eq!(Direction::Clockwise.next_state(3), 0);
    /// assert_eq!(Direction::CounterClockwise.next_state(0), 3);
    /// ```
    pub fn next_state(self, state: u8) -> u8 {
        match self {
            Direction::Clockwise => (state + 1) % 4,
            Direction::CounterClockwise => (state + 3) % 4,
        }
    }
}

/// Player commands accepted by the round controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move the piece one column left
    MoveLeft,
    /// Move the piece one column right
    MoveRight,
    /// Move the piece one row down
    SoftDrop,
    /// Drop to rest and lock immediately
    HardDrop,
    /// Rotate 90° clockwise with wall kicks
    RotateCw,
    /// Rotate 90° counter-clockwise with wall kicks
    RotateCcw,
    /// Stash the active kind (or swap with the stashed one)
    Hold,
}

impl Command {
    /// Parse a command name (case-insensitive, camelCase or kebab-case).
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("hard-drop"), Some(Command::HardDrop));
    /// assert_eq!(Command::from_str("pause"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "").as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "hold" => Some(Command::Hold),
            _ => None,
        }
    }

    /// camelCase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::Hold => "hold",
        }
    }
}

/// Result of feeding one command to the round controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandOutcome {
    /// The command changed the round state.
    pub accepted: bool,
    /// Rows removed by a lock triggered by this command.
    pub lines_cleared: u32,
    /// The round is over after this command.
    pub game_over: bool,
}

impl CommandOutcome {
    pub fn rejected(game_over: bool) -> Self {
        Self {
            accepted: false,
            lines_cleared: 0,
            game_over,
        }
    }
}
