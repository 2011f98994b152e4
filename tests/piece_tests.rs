//! Piece tests - fill masks and rotation behavior across all seven kinds

use blockfall::core::{fill_masks, Frame, Geometry, Piece, PixelRect};
use blockfall::types::{PieceKind, RotationDir};

fn test_geometry() -> Geometry {
    Geometry::new(20, 20, PixelRect::new(0, 0, 200, 200))
}

#[test]
fn test_every_kind_has_consistent_masks() {
    for kind in PieceKind::ALL {
        let masks = fill_masks(kind);
        assert!(!masks.is_empty(), "{:?} has no orientations", kind);

        for mask in masks {
            assert!(!mask.is_empty());

            // Rectangular: every row spans the same number of columns.
            let cols = mask[0].len();
            assert!(mask.iter().all(|row| row.len() == cols));

            // Four filled cells per orientation.
            let filled = mask
                .iter()
                .flat_map(|row| row.iter())
                .filter(|&&cell| cell == 1)
                .count();
            assert_eq!(filled, 4, "{:?} should fill four cells", kind);
        }
    }
}

#[test]
fn test_dimensions_follow_the_active_mask() {
    let geometry = test_geometry();

    let mut bar = Piece::new(PieceKind::I, geometry);
    assert_eq!((bar.width(), bar.height()), (4, 1));
    bar.rotate(RotationDir::Clockwise);
    assert_eq!((bar.width(), bar.height()), (1, 4));

    let square = Piece::new(PieceKind::O, geometry);
    assert_eq!((square.width(), square.height()), (2, 2));
}

#[test]
fn test_full_clockwise_cycle_returns_to_start() {
    let geometry = test_geometry();

    for kind in PieceKind::ALL {
        let mut piece = Piece::new(kind, geometry);
        piece.set_x(5, Frame::Grid);
        piece.set_y(5, Frame::Grid);

        for _ in 0..fill_masks(kind).len() {
            piece.rotate(RotationDir::Clockwise);
        }

        assert_eq!(piece.orientation(), 0, "{:?}", kind);
        assert_eq!(piece.x(Frame::Grid), 5, "{:?}", kind);
        assert_eq!(piece.y(Frame::Grid), 5, "{:?}", kind);
    }
}

#[test]
fn test_counter_rotation_undoes_the_origin_shift() {
    let geometry = test_geometry();

    for kind in PieceKind::ALL {
        let mut piece = Piece::new(kind, geometry);
        piece.set_x(5, Frame::Grid);
        piece.set_y(5, Frame::Grid);
        let before = piece;

        piece.rotate(RotationDir::Clockwise);
        piece.rotate(RotationDir::CounterClockwise);

        assert_eq!(piece, before, "{:?}", kind);
    }
}

#[test]
fn test_rotation_counts_accumulate_below_zero() {
    let geometry = test_geometry();
    let mut piece = Piece::new(PieceKind::T, geometry);

    piece.rotate(RotationDir::CounterClockwise);
    assert_eq!(piece.orientation(), 3);

    piece.rotate(RotationDir::CounterClockwise);
    assert_eq!(piece.orientation(), 2);
}

#[test]
fn test_kind_colors_are_distinct() {
    for (i, a) in PieceKind::ALL.iter().enumerate() {
        for b in &PieceKind::ALL[i + 1..] {
            assert_ne!(a.color(), b.color(), "{:?} and {:?} share a color", a, b);
        }
    }
}
