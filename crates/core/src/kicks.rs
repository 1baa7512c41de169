//! Wall kick tables (SRS)
//!
//! Offsets are `(row, col)` translations applied to the piece anchor, rows growing
//! downward. Each list has exactly five entries and always starts with `(0, 0)`.
//! Lookups are keyed by kind class, direction and the state the piece rotates *from*.
//! Reference: https://tetris.wiki/Super_Rotation_System

use crate::types::{Direction, PieceKind};

/// Anchor translation `(row, col)`.
pub type Offset = (i8, i8);

/// Ordered candidates for one rotation.
pub type Kicks = [Offset; 5];

type KickTable = [[Kicks; 4]; 2];

/// Which table a kind rotates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickClass {
    /// The long piece.
    I,
    /// J, L, S, T and Z. O never rotates and never consults a table.
    Standard,
}

impl KickClass {
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => KickClass::I,
            _ => KickClass::Standard,
        }
    }
}

const I_KICKS: KickTable = [
    // clockwise
    [
        [(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)], // 0->1
        [(0, 0), (0, -1), (0, 2), (-2, -1), (1, 2)], // 1->2
        [(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)], // 2->3
        [(0, 0), (0, 1), (0, -2), (2, 1), (-1, -2)], // 3->0
    ],
    // counter-clockwise
    [
        [(0, 0), (0, -1), (0, 2), (-2, -1), (1, 2)], // 0->3
        [(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)], // 1->0
        [(0, 0), (0, 1), (0, -2), (2, 1), (-1, -2)], // 2->1
        [(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)], // 3->2
    ],
];

const STANDARD_KICKS: KickTable = [
    // clockwise
    [
        [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)], // 0->1
        [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],   // 1->2
        [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],    // 2->3
        [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)], // 3->0
    ],
    // counter-clockwise
    [
        [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],    // 0->3
        [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],   // 1->0
        [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)], // 2->1
        [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)], // 3->2
    ],
];

/// Kick candidates for rotating `kind` from `state` in `direction`.
///
/// # Panics
///
/// If `state` is not in `0..=3`.
pub fn kicks(kind: PieceKind, direction: Direction, state: u8) -> &'static Kicks {
    let table = match KickClass::of(kind) {
        KickClass::I => &I_KICKS,
        KickClass::Standard => &STANDARD_KICKS,
    };
    let dir = match direction {
        Direction::Clockwise => 0,
        Direction::CounterClockwise => 1,
    };
    &table[dir][state as usize]
}
