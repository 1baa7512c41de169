//! Board module - the fixed playing field
//!
//! The visible field is `BOARD_ROWS` x `BOARD_COLUMNS` cells, rows counted from the top.
//! Storage carries a `MARGIN`-wide border of always-empty cells on every side so that
//! lookups a few cells past an edge stay inside the array. The border is never exposed:
//! every public method takes visible coordinates.

use std::fmt;

use crate::types::{Cell, InvalidPieceKind, PieceKind, BOARD_COLUMNS, BOARD_ROWS};

/// Width of the empty border around the visible cells.
const MARGIN: usize = 3;

const STORAGE_ROWS: usize = BOARD_ROWS + 2 * MARGIN;
const STORAGE_COLUMNS: usize = BOARD_COLUMNS + 2 * MARGIN;

type Row = [Cell; STORAGE_COLUMNS];

/// The playing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; STORAGE_ROWS],
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            rows: [[None; STORAGE_COLUMNS]; STORAGE_ROWS],
        }
    }

    pub fn rows(&self) -> usize {
        BOARD_ROWS
    }

    pub fn columns(&self) -> usize {
        BOARD_COLUMNS
    }

    #[inline(always)]
    fn storage(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows
            .get(row.checked_add(MARGIN)?)?
            .get(col.checked_add(MARGIN)?)
    }

    /// True iff `(row, col)` lies outside the visible field.
    pub fn out_of_range(&self, row: usize, col: usize) -> bool {
        row >= BOARD_ROWS || col >= BOARD_COLUMNS
    }

    /// True if the cell holds a locked block.
    ///
    /// Only meaningful inside the visible field; callers check [`Board::out_of_range`] first.
    /// Coordinates past the storage border read as empty.
    pub fn occupied(&self, row: usize, col: usize) -> bool {
        matches!(self.storage(row, col), Some(Some(_)))
    }

    /// Cell identity at a visible coordinate, `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if self.out_of_range(row, col) {
            return None;
        }
        self.storage(row, col).copied()
    }

    /// Mark a visible cell as occupied by `kind`.
    ///
    /// The caller guarantees the cell is in range and currently empty.
    pub fn set(&mut self, row: usize, col: usize, kind: PieceKind) {
        debug_assert!(!self.out_of_range(row, col), "set({row}, {col}) out of range");
        debug_assert!(!self.occupied(row, col), "set({row}, {col}) on occupied cell");
        self.rows[row + MARGIN][col + MARGIN] = Some(kind);
    }

    /// Check if a visible row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_ROWS {
            return false;
        }
        self.visible(row).iter().all(|cell| cell.is_some())
    }

    fn visible(&self, row: usize) -> &[Cell] {
        &self.rows[row + MARGIN][MARGIN..MARGIN + BOARD_COLUMNS]
    }

    /// Remove every full row in one pass and return how many were removed.
    ///
    /// Rows are scanned bottom to top with separate read and write cursors: a full row
    /// is skipped, any other row is copied down to the write cursor. Surviving rows keep
    /// their order and drop by the number of full rows beneath them; the rows left
    /// above the write cursor are emptied.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut write = BOARD_ROWS;

        for read in (0..BOARD_ROWS).rev() {
            if self.is_row_full(read) {
                cleared += 1;
                continue;
            }
            write -= 1;
            if write != read {
                self.rows[write + MARGIN] = self.rows[read + MARGIN];
            }
        }

        for row in 0..write {
            self.rows[row + MARGIN] = [None; STORAGE_COLUMNS];
        }

        cleared
    }

    /// Count occupied visible cells
    pub fn occupied_count(&self) -> usize {
        (0..BOARD_ROWS)
            .map(|row| self.visible(row).iter().filter(|c| c.is_some()).count())
            .sum()
    }

    /// Build a board from text rows, `.` for empty and a kind symbol for occupied.
    ///
    /// Rows are aligned to the bottom of the field. Intended for tests and benches.
    ///
    /// ```
    /// use blockfall_core::Board;
    ///
    /// let board = Board::from_rows(&["IIIIIIIII."]).unwrap();
    /// assert!(board.occupied(19, 0));
    /// assert!(!board.occupied(19, 9));
    ///
    /// assert!(Board::from_rows(&["IIIIIIIII"]).is_err());
    /// assert!(Board::from_rows(&["IIIIIIIII#"]).is_err());
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardLayoutError> {
        if rows.len() > BOARD_ROWS {
            return Err(BoardLayoutError::TooManyRows(rows.len()));
        }
        let mut board = Self::new();
        let top = BOARD_ROWS - rows.len();
        for (i, line) in rows.iter().enumerate() {
            let width = line.chars().count();
            if width != BOARD_COLUMNS {
                return Err(BoardLayoutError::WrongWidth { row: i, width });
            }
            for (col, ch) in line.chars().enumerate() {
                if ch != '.' {
                    board.set(top + i, col, PieceKind::try_from(ch)?);
                }
            }
        }
        Ok(board)
    }
}

/// Why [`Board::from_rows`] rejected a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardLayoutError {
    TooManyRows(usize),
    /// Row index within the input, and its width in characters.
    WrongWidth { row: usize, width: usize },
    InvalidKind(InvalidPieceKind),
}

impl From<InvalidPieceKind> for BoardLayoutError {
    fn from(err: InvalidPieceKind) -> Self {
        BoardLayoutError::InvalidKind(err)
    }
}

impl fmt::Display for BoardLayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardLayoutError::TooManyRows(n) => {
                write!(f, "{n} rows given, the board has {BOARD_ROWS}")
            }
            BoardLayoutError::WrongWidth { row, width } => {
                write!(f, "row {row} is {width} wide, expected {BOARD_COLUMNS}")
            }
            BoardLayoutError::InvalidKind(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for BoardLayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BoardLayoutError::InvalidKind(err) => Some(err),
            _ => None,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, row: usize) {
        for col in 0..BOARD_COLUMNS {
            board.set(row, col, PieceKind::I);
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.occupied_count(), 0);
        for row in 0..BOARD_ROWS {
            for col in 0..BOARD_COLUMNS {
                assert!(!board.occupied(row, col));
                assert_eq!(board.get(row, col), Some(None));
            }
        }
    }

    #[test]
    fn test_out_of_range() {
        let board = Board::new();
        assert!(!board.out_of_range(0, 0));
        assert!(!board.out_of_range(BOARD_ROWS - 1, BOARD_COLUMNS - 1));
        assert!(board.out_of_range(BOARD_ROWS, 0));
        assert!(board.out_of_range(0, BOARD_COLUMNS));
        assert!(board.out_of_range(usize::MAX, 0));
    }

    #[test]
    fn test_margin_reads_as_empty() {
        let mut board = Board::new();
        fill_row(&mut board, BOARD_ROWS - 1);
        // Past the right edge and below the bottom: border cells, never occupied.
        assert!(!board.occupied(BOARD_ROWS - 1, BOARD_COLUMNS));
        assert!(!board.occupied(BOARD_ROWS, 0));
        assert!(!board.occupied(usize::MAX, usize::MAX));
        assert_eq!(board.get(BOARD_ROWS, 0), None);
    }

    #[test]
    fn test_set_keeps_kind() {
        let mut board = Board::new();
        board.set(5, 7, PieceKind::T);
        assert!(board.occupied(5, 7));
        assert_eq!(board.get(5, 7), Some(Some(PieceKind::T)));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_clear_nothing() {
        let mut board = Board::from_rows(&["IIIIIIIII."]).unwrap();
        let before = board.clone();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_from_rows_rejects_bad_layouts() {
        let tall = [".........."; BOARD_ROWS + 1];
        assert_eq!(
            Board::from_rows(&tall),
            Err(BoardLayoutError::TooManyRows(BOARD_ROWS + 1))
        );
        assert_eq!(
            Board::from_rows(&["..........", "IIII"]),
            Err(BoardLayoutError::WrongWidth { row: 1, width: 4 })
        );
        assert_eq!(
            Board::from_rows(&["IIIII#IIII"]),
            Err(BoardLayoutError::InvalidKind(InvalidPieceKind('#')))
        );
    }

    #[test]
    fn test_clear_non_contiguous_rows() {
        let mut board = Board::from_rows(&[
            "T.........", // row 15
            "IIIIIIIIII", // row 16 (full)
            "..J.......", // row 17
            "OOOOOOOOOO", // row 18 (full)
            "S........S", // row 19
        ])
        .unwrap();

        assert_eq!(board.clear_full_rows(), 2);

        assert_eq!(board.get(19, 0), Some(Some(PieceKind::S)));
        assert_eq!(board.get(19, 9), Some(Some(PieceKind::S)));
        assert_eq!(board.get(18, 2), Some(Some(PieceKind::J)));
        assert_eq!(board.get(17, 0), Some(Some(PieceKind::T)));
        assert_eq!(board.occupied_count(), 4);
        for row in 0..17 {
            assert!((0..BOARD_COLUMNS).all(|c| !board.occupied(row, c)));
        }
    }

    #[test]
    fn test_clear_four_rows() {
        let mut board = Board::new();
        for row in 16..20 {
            fill_row(&mut board, row);
        }
        board.set(15, 4, PieceKind::L);

        assert_eq!(board.clear_full_rows(), 4);
        assert_eq!(board.occupied_count(), 1);
        assert_eq!(board.get(19, 4), Some(Some(PieceKind::L)));
    }

    #[test]
    fn test_clear_top_row() {
        let mut board = Board::new();
        fill_row(&mut board, 0);
        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.occupied_count(), 0);
    }
}
