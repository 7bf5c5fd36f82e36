//! Pieces module - tetromino shape matrices and rotation
//!
//! Shapes are square 0/1 matrices (2x2 for O, 4x4 for I, 3x3 for the
//! rest). A piece rotates by transforming its matrix in place: transpose,
//! then reverse each row, which is a 90-degree clockwise turn. There is
//! no orientation state; four rotations restore the base matrix exactly.

use serde::Serialize;

use crate::types::PieceKind;

/// Largest shape edge length (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Horizontal offsets tried, in order, when an in-place rotation
/// collides (wall kicks).
pub const KICK_OFFSETS: [i8; 4] = [-1, 1, -2, 2];

/// A square 0/1 occupancy matrix.
///
/// Only the leading `size x size` corner of the backing array is
/// meaningful; the rest stays zero so equality and hashing work on the
/// whole value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    size: u8,
    cells: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Edge length of the matrix (2, 3, or 4).
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the matrix cell at (row, col) is occupied.
    ///
    /// Out-of-range coordinates read as empty.
    pub fn filled(&self, row: u8, col: u8) -> bool {
        if row >= self.size || col >= self.size {
            return false;
        }
        self.cells[row as usize][col as usize] != 0
    }

    /// Iterate occupied cells as (row, col) offsets from the origin.
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let size = self.size;
        (0..size).flat_map(move |row| {
            (0..size).filter_map(move |col| {
                if self.filled(row, col) {
                    Some((row as i8, col as i8))
                } else {
                    None
                }
            })
        })
    }

    /// The matrix rotated 90 degrees clockwise: transpose, then reverse
    /// each row within the `size x size` window.
    pub fn rotated_cw(&self) -> Shape {
        let n = self.size as usize;
        let mut out = [[0u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (row, out_row) in out.iter_mut().enumerate().take(n) {
            for (col, out_cell) in out_row.iter_mut().enumerate().take(n) {
                // Transposed cell (col, row), then mirrored: column c of the
                // result reads transposed column (n - 1 - c).
                *out_cell = self.cells[n - 1 - col][row];
            }
        }
        Shape {
            size: self.size,
            cells: out,
        }
    }

    #[cfg(test)]
    pub fn from_rows(rows: &[&[u8]]) -> Shape {
        let size = rows.len() as u8;
        let mut cells = [[0u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), rows.len(), "shape matrix must be square");
            for (c, v) in row.iter().enumerate() {
                cells[r][c] = *v;
            }
        }
        Shape { size, cells }
    }
}

/// Base (spawn-orientation) matrix for a piece kind.
pub fn base_shape(kind: PieceKind) -> Shape {
    let (size, rows): (u8, [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) = match kind {
        PieceKind::I => (
            4,
            [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        PieceKind::J => (
            3,
            [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        PieceKind::L => (
            3,
            [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        PieceKind::O => (
            2,
            [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        PieceKind::S => (
            3,
            [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        PieceKind::T => (
            3,
            [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        PieceKind::Z => (
            3,
            [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
    };
    Shape { size, cells: rows }
}

/// Spawn x origin that horizontally centers a shape on a board of
/// `cols` columns.
pub fn spawn_x(cols: u8, shape: &Shape) -> i8 {
    (cols / 2) as i8 - (shape.size / 2) as i8
}

/// Try to rotate a shape clockwise at (x, y), kicking horizontally if
/// the in-place rotation collides.
///
/// Returns the rotated shape and the adjusted x on success, `None` when
/// every kick fails (the caller discards the rotation).
pub fn try_rotate_cw(
    shape: &Shape,
    x: i8,
    y: i8,
    collides: impl Fn(i8, i8, &Shape) -> bool,
) -> Option<(Shape, i8)> {
    let rotated = shape.rotated_cw();

    if !collides(x, y, &rotated) {
        return Some((rotated, x));
    }

    for &kick in KICK_OFFSETS.iter() {
        if !collides(x + kick, y, &rotated) {
            return Some((rotated, x + kick));
        }
    }

    None
}
