//! Piece module - piece geometry, movement and SRS rotation
//!
//! A piece is a 4x4 boolean mask plus an anchor locating the mask's top-left corner
//! on the board. The anchor may sit left of or above the field (its empty mask
//! columns/rows hang off the edge), so it is signed; board coordinates are derived
//! with checked arithmetic and never handed to [`Board`] negative.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::kicks::kicks;
use crate::types::{Direction, PieceKind, SPAWN_COLUMN, SPAWN_ROW};

/// 4x4 occupancy mask, indexed `[row][col]`.
pub type Mask = [[bool; 4]; 4];

const fn mask(bits: [[u8; 4]; 4]) -> Mask {
    let mut out = [[false; 4]; 4];
    let mut i = 0;
    while i < 4 {
        let mut j = 0;
        while j < 4 {
            out[i][j] = bits[i][j] != 0;
            j += 1;
        }
        i += 1;
    }
    out
}

const I_SPAWN: Mask = mask([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]);
const J_SPAWN: Mask = mask([[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const L_SPAWN: Mask = mask([[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const O_SPAWN: Mask = mask([[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const S_SPAWN: Mask = mask([[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const Z_SPAWN: Mask = mask([[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const T_SPAWN: Mask = mask([[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);

/// Canonical state-0 mask for a kind.
pub fn spawn_mask(kind: PieceKind) -> Mask {
    match kind {
        PieceKind::I => I_SPAWN,
        PieceKind::J => J_SPAWN,
        PieceKind::L => L_SPAWN,
        PieceKind::O => O_SPAWN,
        PieceKind::S => S_SPAWN,
        PieceKind::Z => Z_SPAWN,
        PieceKind::T => T_SPAWN,
    }
}

/// Side of the square the mask rotates within.
fn frame(kind: PieceKind) -> usize {
    match kind {
        PieceKind::I => 4,
        _ => 3,
    }
}

/// Rotate the top-left `f`x`f` block of a mask a quarter turn.
pub fn rotate_mask(mask: &Mask, f: usize, direction: Direction) -> Mask {
    let mut out = [[false; 4]; 4];
    for i in 0..f {
        for j in 0..f {
            match direction {
                Direction::Clockwise => out[j][f - 1 - i] = mask[i][j],
                Direction::CounterClockwise => out[f - 1 - j][i] = mask[i][j],
            }
        }
    }
    out
}

/// Board coordinate of mask cell `(i, j)` under anchor `(row, col)`, if non-negative.
#[inline(always)]
fn board_coord(row: i8, col: i8, i: usize, j: usize) -> Option<(usize, usize)> {
    let r = usize::try_from(row as i16 + i as i16).ok()?;
    let c = usize::try_from(col as i16 + j as i16).ok()?;
    Some((r, c))
}

/// True if every set cell of `mask` anchored at `(row, col)` is on the field and empty.
fn fits(mask: &Mask, row: i8, col: i8, board: &Board) -> bool {
    for (i, mask_row) in mask.iter().enumerate() {
        for (j, &set) in mask_row.iter().enumerate() {
            if !set {
                continue;
            }
            let Some((r, c)) = board_coord(row, col, i, j) else {
                return false;
            };
            if board.out_of_range(r, c) || board.occupied(r, c) {
                return false;
            }
        }
    }
    true
}

/// The active, uncommitted piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    mask: Mask,
    state: u8,
    row: i8,
    col: i8,
}

impl Piece {
    /// New piece of `kind` in state 0 at the spawn anchor.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            mask: spawn_mask(kind),
            state: 0,
            row: SPAWN_ROW,
            col: SPAWN_COLUMN,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Rotation state, 0..=3.
    pub fn state(&self) -> u8 {
        self.state
    }

    /// Anchor `(row, col)` of the mask's top-left corner.
    pub fn anchor(&self) -> (i8, i8) {
        (self.row, self.col)
    }

    /// True if the piece in its current placement is legal on `board`.
    pub fn fits(&self, board: &Board) -> bool {
        fits(&self.mask, self.row, self.col, board)
    }

    /// True if any cell of the piece sits on an occupied board cell.
    ///
    /// Unlike [`Piece::fits`] this ignores cells outside the field.
    pub fn overlaps(&self, board: &Board) -> bool {
        self.cells()
            .iter()
            .any(|&(r, c)| !board.out_of_range(r, c) && board.occupied(r, c))
    }

    /// Translate by `(delta_row, delta_col)` if the result is legal.
    ///
    /// Returns false and leaves the piece untouched otherwise.
    pub fn try_move(&mut self, delta_row: i8, delta_col: i8, board: &Board) -> bool {
        let (Some(row), Some(col)) = (
            self.row.checked_add(delta_row),
            self.col.checked_add(delta_col),
        ) else {
            return false;
        };
        if !fits(&self.mask, row, col, board) {
            return false;
        }
        self.row = row;
        self.col = col;
        true
    }

    /// Rotate a quarter turn, trying the five kick offsets in order.
    ///
    /// The O piece always succeeds without changing anything. On failure the mask,
    /// state and anchor are left exactly as they were.
    pub fn try_rotate(&mut self, clockwise: bool, board: &Board) -> bool {
        if self.kind == PieceKind::O {
            return true;
        }

        let direction = if clockwise {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        };
        let rotated = rotate_mask(&self.mask, frame(self.kind), direction);

        for &(dr, dc) in kicks(self.kind, direction, self.state) {
            let (Some(row), Some(col)) = (self.row.checked_add(dr), self.col.checked_add(dc))
            else {
                continue;
            };
            if fits(&rotated, row, col, board) {
                self.mask = rotated;
                self.state = direction.next_state(self.state);
                self.row = row;
                self.col = col;
                return true;
            }
        }

        false
    }

    /// True iff `(row, col)` is inside the 4x4 footprint and that mask cell is set.
    pub fn occupies(&self, row: usize, col: usize) -> bool {
        let dr = row as i64 - self.row as i64;
        let dc = col as i64 - self.col as i64;
        if !(0..4).contains(&dr) || !(0..4).contains(&dc) {
            return false;
        }
        self.mask[dr as usize][dc as usize]
    }

    /// Board coordinates of the occupied cells (cells above or left of the field are skipped).
    pub fn cells(&self) -> ArrayVec<(usize, usize), 4> {
        let mut out = ArrayVec::new();
        for (i, mask_row) in self.mask.iter().enumerate() {
            for (j, &set) in mask_row.iter().enumerate() {
                if set {
                    if let Some(coord) = board_coord(self.row, self.col, i, j) {
                        out.push(coord);
                    }
                }
            }
        }
        out
    }

    /// Move down until blocked and return the number of rows travelled.
    pub fn drop_to_rest(&mut self, board: &Board) -> u32 {
        let mut distance = 0;
        while self.try_move(1, 0, board) {
            distance += 1;
        }
        distance
    }

    /// Copy of this piece moved to where a hard drop would leave it.
    pub fn ghost(&self, board: &Board) -> Piece {
        let mut ghost = *self;
        ghost.drop_to_rest(board);
        ghost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BOARD_COLUMNS, BOARD_ROWS};

    fn count(mask: &Mask) -> usize {
        mask.iter().flatten().filter(|&&b| b).count()
    }

    #[test]
    fn test_spawn_defaults() {
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind);
            assert_eq!(piece.kind(), kind);
            assert_eq!(piece.state(), 0);
            assert_eq!(piece.anchor(), (0, 3));
            assert_eq!(count(piece.mask()), 4);
            assert!(piece.fits(&Board::new()));
        }
    }

    #[test]
    fn test_i_spawns_on_second_row() {
        let piece = Piece::spawn(PieceKind::I);
        for col in 3..7 {
            assert!(piece.occupies(1, col));
            assert!(!piece.occupies(0, col));
        }
        assert!(!piece.occupies(1, 2));
        assert!(!piece.occupies(1, 7));
    }

    #[test]
    fn test_rotate_mask_cw_then_ccw_is_identity() {
        for kind in PieceKind::ALL {
            let m = spawn_mask(kind);
            let f = frame(kind);
            let back = rotate_mask(
                &rotate_mask(&m, f, Direction::Clockwise),
                f,
                Direction::CounterClockwise,
            );
            assert_eq!(back, m, "{kind:?}");
        }
    }

    #[test]
    fn test_four_cw_turns_return_to_spawn_mask() {
        for kind in PieceKind::ALL {
            let mut m = spawn_mask(kind);
            for _ in 0..4 {
                m = rotate_mask(&m, frame(kind), Direction::Clockwise);
                assert_eq!(count(&m), 4);
            }
            assert_eq!(m, spawn_mask(kind));
        }
    }

    #[test]
    fn test_t_clockwise_points_right() {
        let m = rotate_mask(&T_SPAWN, 3, Direction::Clockwise);
        let expected = mask([[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]]);
        assert_eq!(m, expected);
    }

    #[test]
    fn test_i_clockwise_is_third_column() {
        let m = rotate_mask(&I_SPAWN, 4, Direction::Clockwise);
        for row in m.iter() {
            assert_eq!(row, &[false, false, true, false]);
        }
    }

    #[test]
    fn test_try_move_walls() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::T);

        let mut moved = 0;
        while piece.try_move(0, -1, &board) {
            moved += 1;
        }
        assert_eq!(moved, 3);
        assert_eq!(piece.anchor(), (0, 0));

        let mut moved = 0;
        while piece.try_move(0, 1, &board) {
            moved += 1;
        }
        // T occupies mask columns 0..=2, so the anchor stops at column 7.
        assert_eq!(moved, 7);
        assert_eq!(piece.anchor(), (0, 7));

        // Can't leave through the top.
        assert!(!piece.try_move(-1, 0, &board));
    }

    #[test]
    fn test_try_move_blocked_leaves_piece_untouched() {
        let mut board = Board::new();
        board.set(2, 4, PieceKind::O);
        let mut piece = Piece::spawn(PieceKind::T);
        let before = piece;
        // T spawn covers (1, 3..=5); moving down would put (2, 4) on the block.
        assert!(!piece.try_move(1, 0, &board));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_drop_to_rest_on_empty_board() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::I);
        // Bar sits on mask row 1, so the anchor rests one row above the floor row.
        assert_eq!(piece.drop_to_rest(&board), (BOARD_ROWS - 2) as u32);
        assert!(piece.occupies(BOARD_ROWS - 1, 3));
    }

    #[test]
    fn test_ghost_leaves_piece_in_place() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::L);
        let ghost = piece.ghost(&board);
        assert_eq!(piece.anchor(), (0, 3));
        assert_eq!(ghost.anchor(), (BOARD_ROWS as i8 - 2, 3));
        assert_eq!(ghost.mask(), piece.mask());
    }

    #[test]
    fn test_rotate_in_place() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::I);
        assert!(piece.try_rotate(true, &board));
        assert_eq!(piece.state(), 1);
        assert_eq!(piece.anchor(), (0, 3));
        for row in 0..4 {
            assert!(piece.occupies(row, 5));
        }

        assert!(piece.try_rotate(false, &board));
        assert_eq!(piece.state(), 0);
        assert_eq!(piece, Piece::spawn(PieceKind::I));
    }

    #[test]
    fn test_o_rotation_is_a_no_op() {
        let board = Board::from_rows(&["OOOOOOOOO."; 18]).unwrap();
        let mut piece = Piece::spawn(PieceKind::O);
        let before = piece;
        assert!(piece.try_rotate(true, &board));
        assert!(piece.try_rotate(false, &board));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_t_kicks_off_left_wall() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::T);
        assert!(piece.try_rotate(true, &board)); // state 1, mask columns 1..=2
        assert!(piece.try_move(1, 0, &board));
        while piece.try_move(0, -1, &board) {}
        assert_eq!(piece.anchor(), (1, -1));

        // 1->2 in place would put mask column 0 at board column -1; second candidate (0, +1).
        assert!(piece.try_rotate(true, &board));
        assert_eq!(piece.state(), 2);
        assert_eq!(piece.anchor(), (1, 0));
    }

    #[test]
    fn test_i_kicks_off_right_wall() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::I);
        assert!(piece.try_rotate(true, &board)); // vertical in mask column 2
        while piece.try_move(0, 1, &board) {}
        assert_eq!(piece.anchor(), (0, 7));
        assert!(piece.try_move(1, 0, &board));

        // 1->0 candidates: (0,0) and (0,+2) overhang the right wall, (0,-1) fits.
        assert!(piece.try_rotate(false, &board));
        assert_eq!(piece.state(), 0);
        assert_eq!(piece.anchor(), (1, 6));
        for (_, c) in piece.cells() {
            assert!(c < BOARD_COLUMNS);
        }
    }

    #[test]
    fn test_failed_rotation_leaves_piece_untouched() {
        // A vertical I sealed in a one-wide well cannot rotate anywhere.
        let board = Board::from_rows(&["OOOOO.OOOO"; 20]).unwrap();
        let mut piece = Piece::spawn(PieceKind::I);
        // Place the state-1 mask (column 2) in column 5 without going through rotation.
        piece.mask = rotate_mask(&I_SPAWN, 4, Direction::Clockwise);
        piece.state = 1;
        piece.row = 8;
        piece.col = 3;
        assert!(piece.fits(&board));

        let before = piece;
        assert!(!piece.try_rotate(true, &board));
        assert_eq!(piece, before);
        assert!(!piece.try_rotate(false, &board));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_occupies_outside_footprint() {
        let piece = Piece::spawn(PieceKind::Z);
        assert!(piece.occupies(0, 3));
        assert!(piece.occupies(0, 4));
        assert!(piece.occupies(1, 4));
        assert!(piece.occupies(1, 5));
        assert!(!piece.occupies(0, 5));
        assert!(!piece.occupies(4, 3));
        assert!(!piece.occupies(0, 2));
        assert!(!piece.occupies(0, 7));
    }

    #[test]
    fn test_cells_match_occupies() {
        let piece = Piece::spawn(PieceKind::S);
        let cells = piece.cells();
        assert_eq!(cells.len(), 4);
        for (r, c) in cells {
            assert!(piece.occupies(r, c));
        }
    }
}
