//! Piece module - 3x3 shape matrices and matrix rotation
//!
//! Every shape lives in a 3x3 matrix of color tags, so rotation is a plain
//! 90° turn of a square matrix. Rotation never checks collisions; callers
//! rotate speculatively with [`rotate_clockwise`] / [`rotate_counterclockwise`]
//! and commit only what the grid accepts.

use crate::types::{BlockColor, Matrix, ShapeKind, EMPTY, PIECE_SIZE};

const LAST: usize = PIECE_SIZE - 1;

/// Which side of the bounding box to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Get the spawn matrix for a shape kind
pub fn shape_cells(kind: ShapeKind) -> Matrix {
    let c = kind.color().tag();
    match kind {
        ShapeKind::L => [
            [c, 0, 0], //
            [c, c, c],
            [0, 0, 0],
        ],
        ShapeKind::LMirrored => [
            [0, 0, c], //
            [c, c, c],
            [0, 0, 0],
        ],
        ShapeKind::T => [
            [c, c, c], //
            [0, c, 0],
            [0, 0, 0],
        ],
        ShapeKind::Square => [
            [c, c, 0], //
            [c, c, 0],
            [0, 0, 0],
        ],
        ShapeKind::S => [
            [0, c, c], //
            [c, c, 0],
            [0, 0, 0],
        ],
        ShapeKind::SMirrored => [
            [c, c, 0], //
            [0, c, c],
            [0, 0, 0],
        ],
        ShapeKind::Bar => [
            [0, 0, 0], //
            [c, c, c],
            [0, 0, 0],
        ],
    }
}

/// Rotate a matrix 90° clockwise: `new[r][c] = old[2 - c][r]`.
pub fn rotate_clockwise(m: &Matrix) -> Matrix {
    let mut out = [[EMPTY; PIECE_SIZE]; PIECE_SIZE];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = m[LAST - c][r];
        }
    }
    out
}

/// Rotate a matrix 90° counter-clockwise: `new[r][c] = old[c][2 - r]`.
pub fn rotate_counterclockwise(m: &Matrix) -> Matrix {
    let mut out = [[EMPTY; PIECE_SIZE]; PIECE_SIZE];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = m[c][LAST - r];
        }
    }
    out
}

/// True if column 0 (left) or column 2 (right) holds no blocks.
pub fn is_edge_column_empty(m: &Matrix, side: Side) -> bool {
    let col = match side {
        Side::Left => 0,
        Side::Right => LAST,
    };
    m.iter().all(|row| row[col] == EMPTY)
}

/// True if the matrix's bottom row is padding only.
pub fn is_bottom_row_empty(m: &Matrix) -> bool {
    m[LAST].iter().all(|&cell| cell == EMPTY)
}

/// Number of non-empty cells.
pub fn occupied_count(m: &Matrix) -> usize {
    m.iter().flatten().filter(|&&cell| cell != EMPTY).count()
}

/// The active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    cells: Matrix,
    can_move: bool,
}

impl Piece {
    /// Create a movable piece in its spawn orientation
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            cells: shape_cells(kind),
            can_move: true,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> BlockColor {
        self.kind.color()
    }

    pub fn cells(&self) -> &Matrix {
        &self.cells
    }

    /// False once the piece has merged into the settled grid.
    pub fn can_move(&self) -> bool {
        self.can_move
    }

    pub fn set_can_move(&mut self, can_move: bool) {
        self.can_move = can_move;
    }

    pub fn rotate_clockwise(&mut self) {
        self.cells = rotate_clockwise(&self.cells);
    }

    pub fn rotate_counterclockwise(&mut self) {
        self.cells = rotate_counterclockwise(&self.cells);
    }

    /// The matrix this piece would have after a clockwise turn.
    pub fn rotated_clockwise(&self) -> Matrix {
        rotate_clockwise(&self.cells)
    }

    /// The matrix this piece would have after a counter-clockwise turn.
    pub fn rotated_counterclockwise(&self) -> Matrix {
        rotate_counterclockwise(&self.cells)
    }

    /// Replace the matrix with one produced by a speculative rotation.
    pub fn commit_cells(&mut self, cells: Matrix) {
        self.cells = cells;
    }

    pub fn is_edge_column_empty(&self, side: Side) -> bool {
        is_edge_column_empty(&self.cells, side)
    }

    pub fn is_bottom_row_empty(&self) -> bool {
        is_bottom_row_empty(&self.cells)
    }

    pub fn occupied_count(&self) -> usize {
        occupied_count(&self.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clockwise_turns_l_upright() {
        let rotated = rotate_clockwise(&shape_cells(ShapeKind::L));
        assert_eq!(rotated, [[0, 1, 1], [0, 1, 0], [0, 1, 0]]);
    }

    #[test]
    fn test_counterclockwise_turns_l_upright() {
        let rotated = rotate_counterclockwise(&shape_cells(ShapeKind::L));
        assert_eq!(rotated, [[0, 1, 0], [0, 1, 0], [1, 1, 0]]);
    }

    #[test]
    fn test_opposite_rotations_cancel() {
        for kind in ShapeKind::ALL {
            let m = shape_cells(kind);
            assert_eq!(rotate_counterclockwise(&rotate_clockwise(&m)), m);
        }
    }

    #[test]
    fn test_speculative_rotation_leaves_piece_untouched() {
        let piece = Piece::new(ShapeKind::T);
        let _ = piece.rotated_clockwise();
        assert_eq!(*piece.cells(), shape_cells(ShapeKind::T));
    }

    #[test]
    fn test_edge_columns() {
        let square = Piece::new(ShapeKind::Square);
        assert!(square.is_edge_column_empty(Side::Right));
        assert!(!square.is_edge_column_empty(Side::Left));

        let l_mirrored = Piece::new(ShapeKind::LMirrored);
        assert!(!l_mirrored.is_edge_column_empty(Side::Right));
        assert!(!l_mirrored.is_edge_column_empty(Side::Left));
    }

    #[test]
    fn test_bottom_row_padding() {
        for kind in ShapeKind::ALL {
            assert!(Piece::new(kind).is_bottom_row_empty(), "{:?}", kind);
        }
        let mut t = Piece::new(ShapeKind::T);
        t.rotate_clockwise();
        t.rotate_clockwise();
        assert!(!t.is_bottom_row_empty());
    }

    #[test]
    fn test_new_piece_is_movable() {
        let mut piece = Piece::new(ShapeKind::Bar);
        assert!(piece.can_move());
        piece.set_can_move(false);
        assert!(!piece.can_move());
    }
}
