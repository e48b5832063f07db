//! Piece tests - shape matrices and rotation

use falling_blocks::core::{rotate_clockwise, rotate_counterclockwise, shape_cells, Piece};
use falling_blocks::types::{ShapeKind, EMPTY};

#[test]
fn test_shape_cell_counts() {
    for kind in ShapeKind::ALL {
        let expected = if kind == ShapeKind::Bar { 3 } else { 4 };
        assert_eq!(Piece::new(kind).occupied_count(), expected, "{:?}", kind);
    }
}

#[test]
fn test_each_shape_uses_one_color_tag() {
    for kind in ShapeKind::ALL {
        let tag = kind.color().tag();
        for &cell in shape_cells(kind).iter().flatten() {
            assert!(cell == EMPTY || cell == tag, "{:?} has tag {}", kind, cell);
        }
    }
}

#[test]
fn test_four_rotations_are_identity() {
    for kind in ShapeKind::ALL {
        let start = shape_cells(kind);
        let mut cw = start;
        let mut ccw = start;
        for _ in 0..4 {
            cw = rotate_clockwise(&cw);
            ccw = rotate_counterclockwise(&ccw);
        }
        assert_eq!(cw, start, "{:?} clockwise", kind);
        assert_eq!(ccw, start, "{:?} counter-clockwise", kind);
    }
}

#[test]
fn test_piece_rotation_matches_free_functions() {
    let mut piece = Piece::new(ShapeKind::S);
    let expected = rotate_clockwise(&shape_cells(ShapeKind::S));
    assert_eq!(piece.rotated_clockwise(), expected);
    piece.rotate_clockwise();
    assert_eq!(*piece.cells(), expected);
    piece.rotate_counterclockwise();
    assert_eq!(*piece.cells(), shape_cells(ShapeKind::S));
}

#[test]
fn test_bar_turns_vertical() {
    let rotated = rotate_clockwise(&shape_cells(ShapeKind::Bar));
    assert_eq!(rotated, [[0, 7, 0], [0, 7, 0], [0, 7, 0]]);
}

#[test]
fn test_rotation_preserves_cell_count() {
    for kind in ShapeKind::ALL {
        let mut piece = Piece::new(kind);
        let count = piece.occupied_count();
        piece.rotate_counterclockwise();
        assert_eq!(piece.occupied_count(), count);
    }
}
