//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! Rows above the visible board (y < 0) are open space: a piece may poke above row 0
//! without colliding, but nothing is ever stored there.

use crate::pieces::Piece;
use crate::types::{cell_tag, Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i16 || y < 0 || y >= BOARD_HEIGHT as i16 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a piece cell may occupy (x, y).
    ///
    /// Side walls and the floor are solid, rows above the board are open.
    pub fn is_open(&self, x: i16, y: i16) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i16 || y >= BOARD_HEIGHT as i16 {
            return false;
        }
        if y < 0 {
            return true;
        }
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// True if any filled cell of `piece` hits a wall, the floor, or a locked cell.
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|(x, y, _)| !self.is_open(x, y))
    }

    /// Write the piece's filled cells into the board.
    ///
    /// Callers check `collides` first; cells outside the grid are skipped.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y, tag) in piece.cells() {
            if let Some(kind) = PieceKind::from_tag(tag) {
                self.set(x, y, Some(kind));
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove every full row, shift the rest down, and return how many were removed.
    ///
    /// Surviving rows keep their relative order; empty rows fill in from the top.
    /// Two-pointer compaction, no allocation.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut cleared = 0;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Row of tags (0 = empty).
    pub fn row_tags(&self, y: usize) -> [u8; BOARD_WIDTH as usize] {
        let mut out = [0u8; BOARD_WIDTH as usize];
        if y < BOARD_HEIGHT as usize {
            let start = y * BOARD_WIDTH as usize;
            for (dst, cell) in out.iter_mut().zip(&self.cells[start..]) {
                *dst = cell_tag(*cell);
            }
        }
        out
    }

    /// Copy the board into a tag grid (used by snapshots).
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            *row = self.row_tags(y);
        }
    }

    /// Fill a whole row with one kind.
    pub fn fill_row(&mut self, y: usize, kind: PieceKind) {
        if y < BOARD_HEIGHT as usize {
            let start = y * BOARD_WIDTH as usize;
            self.cells[start..start + BOARD_WIDTH as usize].fill(Some(kind));
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
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
    use crate::geometry::Matrix;

    fn dot(x: i16, y: i16) -> Piece {
        Piece::from_matrix(Matrix::from_rows(&[[1u8]]).unwrap()).at(x, y)
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_collides_walls_and_floor() {
        let board = Board::new();
        assert!(board.collides(&dot(-1, 0)));
        assert!(board.collides(&dot(10, 0)));
        assert!(board.collides(&dot(0, 20)));
        assert!(!board.collides(&dot(0, 0)));
        assert!(!board.collides(&dot(9, 19)));
    }

    #[test]
    fn test_above_board_is_open() {
        let board = Board::new();
        assert!(!board.collides(&dot(4, -1)));
        assert!(!board.collides(&dot(4, -3)));
        // Walls still apply above the board.
        assert!(board.collides(&dot(-1, -1)));
    }

    #[test]
    fn test_collides_with_locked_cells() {
        let mut board = Board::new();
        board.set(0, 19, Some(PieceKind::I));
        assert!(board.collides(&dot(0, 19)));
        assert!(!board.collides(&dot(1, 19)));
    }

    #[test]
    fn test_empty_matrix_cells_never_collide() {
        let mut board = Board::new();
        board.set(0, 0, Some(PieceKind::Z));
        // Hollow corner of the S sits over the occupied cell.
        let s = Piece::new(PieceKind::S).at(0, 0);
        assert!(!board.collides(&s));
    }

    #[test]
    fn test_merge_skips_empty_and_offgrid_cells() {
        let mut board = Board::new();
        let piece = Piece::from_matrix(Matrix::from_rows(&[[0u8, 1], [1, 0]]).unwrap()).at(0, -1);
        board.merge(&piece);
        assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_clear_non_contiguous_rows() {
        let mut board = Board::new();
        board.fill_row(19, PieceKind::I);
        board.fill_row(17, PieceKind::I);
        board.set(3, 18, Some(PieceKind::T));
        board.set(5, 16, Some(PieceKind::L));

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.get(3, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.get(5, 18), Some(Some(PieceKind::L)));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_row_tags() {
        let mut board = Board::new();
        board.set(2, 4, Some(PieceKind::J));
        let row = board.row_tags(4);
        assert_eq!(row[2], 6);
        assert_eq!(row.iter().filter(|&&t| t != 0).count(), 1);
        assert_eq!(board.row_tags(40), [0; 10]);
    }
}
