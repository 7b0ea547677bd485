//! Pieces module - shape catalog and the active piece type
//!
//! Canonical spawn matrices (tags in brackets):
//!
//! ```text
//! I [1]  ####        O [2]  ##     T [3]  .#.
//!                           ##            ###
//!
//! S [4]  .##     Z [5]  ##.     J [6]  #..     L [7]  ..#
//!        ##.            .##            ###            ###
//! ```

use serde::Serialize;

use crate::geometry::Matrix;
use crate::types::{PieceKind, BOARD_WIDTH};

const I_SHAPE: Matrix = Matrix::from_raw(1, 4, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]);
const O_SHAPE: Matrix = Matrix::from_raw(2, 2, [[2, 2, 0, 0], [2, 2, 0, 0], [0; 4], [0; 4]]);
const T_SHAPE: Matrix = Matrix::from_raw(2, 3, [[0, 3, 0, 0], [3, 3, 3, 0], [0; 4], [0; 4]]);
const S_SHAPE: Matrix = Matrix::from_raw(2, 3, [[0, 4, 4, 0], [4, 4, 0, 0], [0; 4], [0; 4]]);
const Z_SHAPE: Matrix = Matrix::from_raw(2, 3, [[5, 5, 0, 0], [0, 5, 5, 0], [0; 4], [0; 4]]);
const J_SHAPE: Matrix = Matrix::from_raw(2, 3, [[6, 0, 0, 0], [6, 6, 6, 0], [0; 4], [0; 4]]);
const L_SHAPE: Matrix = Matrix::from_raw(2, 3, [[0, 0, 7, 0], [7, 7, 7, 0], [0; 4], [0; 4]]);

/// Get the spawn matrix for a piece kind
pub fn get_shape(kind: PieceKind) -> Matrix {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// Column at which a matrix of the given width is centered on the board.
pub fn spawn_x(matrix_width: u8) -> i16 {
    (BOARD_WIDTH / 2) as i16 - (matrix_width / 2) as i16
}

/// A piece: matrix plus the board position of its top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub matrix: Matrix,
    pub x: i16,
    pub y: i16,
}

impl Piece {
    /// Catalog piece at the origin.
    pub fn new(kind: PieceKind) -> Self {
        Self::from_matrix(get_shape(kind))
    }

    pub fn from_matrix(matrix: Matrix) -> Self {
        Self { matrix, x: 0, y: 0 }
    }

    pub fn at(self, x: i16, y: i16) -> Self {
        Self { x, y, ..self }
    }

    /// Copy shifted by (dx, dy).
    pub fn offset(&self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn width(&self) -> u8 {
        self.matrix.cols()
    }

    pub fn height(&self) -> u8 {
        self.matrix.rows()
    }

    /// Kind of the first filled cell.
    pub fn kind(&self) -> Option<PieceKind> {
        self.matrix
            .filled()
            .next()
            .and_then(|(_, _, tag)| PieceKind::from_tag(tag))
    }

    /// Filled cells in board coordinates as `(x, y, tag)`.
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16, u8)> + '_ {
        self.matrix
            .filled()
            .map(move |(dx, dy, tag)| (self.x + dx, self.y + dy, tag))
    }
}
