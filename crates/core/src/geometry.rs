//! Geometry module - piece matrices and quarter-turn rotation
//!
//! A piece is described by a small rectangular matrix of cell tags (0 = empty, 1-7 = kind).
//! The matrix itself is the rotation state: rotating transposes its dimensions, there is no
//! separate angle to track.
//!
//! Matrices are stored inline (at most 4x4) so pieces stay `Copy` and rotation never allocates.

use serde::Serialize;

use crate::types::RotateDir;

/// Largest supported matrix side.
pub const MAX_DIM: usize = 4;

/// Rectangular matrix of cell tags, at most `MAX_DIM` x `MAX_DIM`.
///
/// Invariants: cells outside `rows x cols` are 0, every tag is in 0..=7, and at least one
/// cell is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Matrix {
    rows: u8,
    cols: u8,
    cells: [[u8; MAX_DIM]; MAX_DIM],
}

impl Matrix {
    /// Build a matrix from rows of tags.
    ///
    /// Returns `None` for empty or ragged input, input larger than 4x4, tags above 7, or a
    /// matrix with no filled cell.
    ///
    /// ```
    /// use blockfall_core::Matrix;
    ///
    /// let t = Matrix::from_rows(&[[0u8, 3, 0], [3, 3, 3]]).unwrap();
    /// assert_eq!((t.rows(), t.cols()), (2, 3));
    /// assert!(Matrix::from_rows(&[vec![1u8, 1], vec![1u8]]).is_none());
    /// ```
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Option<Self> {
        let height = rows.len();
        if height == 0 || height > MAX_DIM {
            return None;
        }
        let width = rows[0].as_ref().len();
        if width == 0 || width > MAX_DIM {
            return None;
        }

        let mut cells = [[0u8; MAX_DIM]; MAX_DIM];
        let mut filled = false;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return None;
            }
            for (x, &tag) in row.iter().enumerate() {
                if tag > 7 {
                    return None;
                }
                filled |= tag != 0;
                cells[y][x] = tag;
            }
        }

        if !filled {
            return None;
        }

        Some(Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        })
    }

    /// Const constructor for the built-in shape catalog.
    pub(crate) const fn from_raw(rows: u8, cols: u8, cells: [[u8; MAX_DIM]; MAX_DIM]) -> Self {
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Tag at (x, y) in local coordinates, 0 outside the matrix.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.cols as usize || y >= self.rows as usize {
            return 0;
        }
        self.cells[y][x]
    }

    /// Iterate the non-zero cells as `(x, y, tag)` in local coordinates, row by row.
    pub fn filled(&self) -> impl Iterator<Item = (i16, i16, u8)> + '_ {
        (0..self.rows as usize).flat_map(move |y| {
            (0..self.cols as usize).filter_map(move |x| {
                let tag = self.cells[y][x];
                (tag != 0).then_some((x as i16, y as i16, tag))
            })
        })
    }

    /// Rows as vectors (test/debug helper).
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows as usize)
            .map(|y| self.cells[y][..self.cols as usize].to_vec())
            .collect()
    }
}

/// Rotate a matrix a quarter turn.
///
/// An N x M input produces an M x N output:
/// - clockwise: `result[x][N-1-y] = matrix[y][x]`
/// - counter-clockwise: `result[M-1-x][y] = matrix[y][x]`
///
/// The input is untouched; the caller decides whether the candidate fits.
pub fn rotate(matrix: &Matrix, dir: RotateDir) -> Matrix {
    let n = matrix.rows as usize;
    let m = matrix.cols as usize;
    let mut cells = [[0u8; MAX_DIM]; MAX_DIM];

    for y in 0..n {
        for x in 0..m {
            let tag = matrix.cells[y][x];
            match dir {
                RotateDir::Clockwise => cells[x][n - 1 - y] = tag,
                RotateDir::CounterClockwise => cells[m - 1 - x][y] = tag,
            }
        }
    }

    Matrix {
        rows: m as u8,
        cols: n as u8,
        cells,
    }
}
