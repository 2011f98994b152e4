//! Falling pieces: per-kind shape and rotation-delta tables plus the
//! rotation state machine.
//!
//! Each kind carries one fill mask per orientation and a square delta
//! table indexed `[from][to]`. Rotation moves a piece's bounding-box
//! corner, so the table supplies the origin correction that keeps the
//! piece visually pivoting in place. Only transitions reachable by a
//! single rotation step are populated; hitting an unpopulated entry
//! means the rotation state is corrupt and panics immediately.

use blockfall_types::{BlockColor, PieceKind, RotationDir};

use crate::coordinate::{Coordinate, Frame};
use crate::geometry::Geometry;

/// One orientation's occupancy bitmap, rows top to bottom.
pub type FillMask = &'static [&'static [u8]];

type DeltaTable = &'static [&'static [Option<(i32, i32)>]];

// Masks are listed in clockwise rotation order starting from the spawn
// orientation. Delta tables follow the same index order.

const I_MASKS: [FillMask; 2] = [&[&[1, 1, 1, 1]], &[&[1], &[1], &[1], &[1]]];

const I_DELTAS: DeltaTable = &[
    &[None, Some((1, -1))],
    &[Some((-1, 1)), None],
];

const O_MASKS: [FillMask; 1] = [&[&[1, 1], &[1, 1]]];

const O_DELTAS: DeltaTable = &[&[Some((0, 0))]];

const T_MASKS: [FillMask; 4] = [
    // pointing up
    &[&[0, 1, 0], &[1, 1, 1]],
    // pointing right
    &[&[1, 0], &[1, 1], &[1, 0]],
    // pointing down
    &[&[1, 1, 1], &[0, 1, 0]],
    // pointing left
    &[&[0, 1], &[1, 1], &[0, 1]],
];

const T_DELTAS: DeltaTable = &[
    &[None, Some((1, 0)), None, Some((0, 0))],
    &[Some((-1, 0)), None, Some((-1, 1)), None],
    &[None, Some((1, -1)), None, Some((0, -1))],
    &[Some((0, 0)), None, Some((0, 1)), None],
];

const S_MASKS: [FillMask; 2] = [
    &[&[0, 1, 1], &[1, 1, 0]],
    &[&[1, 0], &[1, 1], &[0, 1]],
];

const S_DELTAS: DeltaTable = &[
    &[None, Some((0, 0))],
    &[Some((0, 0)), None],
];

const Z_MASKS: [FillMask; 2] = [
    &[&[1, 1, 0], &[0, 1, 1]],
    &[&[0, 1], &[1, 1], &[1, 0]],
];

const Z_DELTAS: DeltaTable = &[
    &[None, Some((0, 0))],
    &[Some((0, 0)), None],
];

const J_MASKS: [FillMask; 4] = [
    &[&[1, 0, 0], &[1, 1, 1]],
    &[&[1, 1], &[1, 0], &[1, 0]],
    &[&[1, 1, 1], &[0, 0, 1]],
    &[&[0, 1], &[0, 1], &[1, 1]],
];

// Two distinct moves: horizontal to vertical and back. The corrections
// depend only on the bounding box, so both horizontal orientations share
// a row, as do both vertical ones.
const J_DELTAS: DeltaTable = &[
    &[None, Some((1, -1)), None, Some((1, -1))],
    &[Some((-1, 1)), None, Some((-1, 1)), None],
    &[None, Some((1, -1)), None, Some((1, -1))],
    &[Some((-1, 1)), None, Some((-1, 1)), None],
];

const L_MASKS: [FillMask; 4] = [
    &[&[0, 0, 1], &[1, 1, 1]],
    &[&[1, 0], &[1, 0], &[1, 1]],
    &[&[1, 1, 1], &[1, 0, 0]],
    &[&[1, 1], &[0, 1], &[0, 1]],
];

const L_DELTAS: DeltaTable = &[
    &[None, Some((1, -1)), None, Some((1, -1))],
    &[Some((-1, 1)), None, Some((-1, 1)), None],
    &[None, Some((1, -1)), None, Some((1, -1))],
    &[Some((-1, 1)), None, Some((-1, 1)), None],
];

/// Fill masks for a kind, one per orientation in clockwise order.
pub fn fill_masks(kind: PieceKind) -> &'static [FillMask] {
    match kind {
        PieceKind::I => &I_MASKS,
        PieceKind::O => &O_MASKS,
        PieceKind::T => &T_MASKS,
        PieceKind::S => &S_MASKS,
        PieceKind::Z => &Z_MASKS,
        PieceKind::J => &J_MASKS,
        PieceKind::L => &L_MASKS,
    }
}

fn rotation_deltas(kind: PieceKind) -> DeltaTable {
    match kind {
        PieceKind::I => I_DELTAS,
        PieceKind::O => O_DELTAS,
        PieceKind::T => T_DELTAS,
        PieceKind::S => S_DELTAS,
        PieceKind::Z => Z_DELTAS,
        PieceKind::J => J_DELTAS,
        PieceKind::L => L_DELTAS,
    }
}

/// A falling piece: kind identity, accumulated rotation, and position.
///
/// The rotation count accumulates signed steps without bound; mask
/// lookups normalize it with a Euclidean remainder, so counter-clockwise
/// spins index correctly from negative counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: i32,
    pos: Coordinate,
}

impl Piece {
    pub fn new(kind: PieceKind, geometry: Geometry) -> Self {
        Piece {
            kind,
            rotation: 0,
            pos: Coordinate::new(0, 0, geometry, Frame::Grid),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> BlockColor {
        self.kind.color()
    }

    fn mask_index(&self, offset: i32) -> usize {
        let count = fill_masks(self.kind).len() as i32;
        (self.rotation + offset).rem_euclid(count) as usize
    }

    /// Index of the current orientation, always in `0..mask count`.
    pub fn orientation(&self) -> usize {
        self.mask_index(0)
    }

    /// The mask for the current orientation.
    pub fn fill_mask(&self) -> FillMask {
        fill_masks(self.kind)[self.mask_index(0)]
    }

    /// The mask one rotation away, without committing the rotation.
    pub fn fill_mask_after(&self, dir: RotationDir) -> FillMask {
        fill_masks(self.kind)[self.mask_index(dir.step())]
    }

    /// Rotates one step and returns the `(dx, dy)` origin correction for
    /// the transition, to be added to the piece's position by the caller.
    ///
    /// # Panics
    ///
    /// Panics if the transition has no populated delta, which can only
    /// happen if the tables themselves are wrong.
    pub fn rotate(&mut self, dir: RotationDir) -> (i32, i32) {
        let old = self.mask_index(0);
        self.rotation += dir.step();
        let new = self.mask_index(0);
        match rotation_deltas(self.kind)[old][new] {
            Some(delta) => delta,
            None => panic!(
                "no rotation delta for {:?} transition {} -> {}",
                self.kind, old, new
            ),
        }
    }

    /// Bounding-box width of the current orientation, as the widest row.
    pub fn width(&self) -> i32 {
        self.fill_mask().iter().map(|row| row.len()).max().unwrap_or(0) as i32
    }

    /// Bounding-box height of the current orientation.
    pub fn height(&self) -> i32 {
        self.fill_mask().len() as i32
    }

    pub fn x(&self, frame: Frame) -> i32 {
        self.pos.x(frame)
    }

    pub fn y(&self, frame: Frame) -> i32 {
        self.pos.y(frame)
    }

    pub fn set_x(&mut self, x: i32, frame: Frame) {
        self.pos.set_x(x, frame);
    }

    pub fn set_y(&mut self, y: i32, frame: Frame) {
        self.pos.set_y(y, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PixelRect;

    fn geo() -> Geometry {
        Geometry::new(20, 20, PixelRect::new(0, 0, 200, 200))
    }

    #[test]
    fn test_mask_bounding_boxes() {
        let cases: [(PieceKind, &[(i32, i32)]); 7] = [
            (PieceKind::I, &[(4, 1), (1, 4)]),
            (PieceKind::O, &[(2, 2)]),
            (PieceKind::T, &[(3, 2), (2, 3), (3, 2), (2, 3)]),
            (PieceKind::S, &[(3, 2), (2, 3)]),
            (PieceKind::Z, &[(3, 2), (2, 3)]),
            (PieceKind::J, &[(3, 2), (2, 3), (3, 2), (2, 3)]),
            (PieceKind::L, &[(3, 2), (2, 3), (3, 2), (2, 3)]),
        ];
        for (kind, boxes) in cases {
            assert_eq!(fill_masks(kind).len(), boxes.len(), "{:?}", kind);
            let mut piece = Piece::new(kind, geo());
            for &(w, h) in boxes {
                assert_eq!(piece.width(), w, "{:?} width", kind);
                assert_eq!(piece.height(), h, "{:?} height", kind);
                piece.rotate(RotationDir::Clockwise);
            }
        }
    }

    #[test]
    fn test_width_is_widest_row() {
        for kind in PieceKind::ALL {
            for (index, mask) in fill_masks(kind).iter().enumerate() {
                let widest = mask.iter().map(|row| row.len()).max().unwrap();
                let mut piece = Piece::new(kind, geo());
                for _ in 0..index {
                    piece.rotate(RotationDir::Clockwise);
                }
                assert_eq!(piece.width() as usize, widest);
                assert_eq!(piece.height() as usize, mask.len());
            }
        }
    }

    #[test]
    fn test_bar_rotation_deltas() {
        let mut piece = Piece::new(PieceKind::I, geo());
        assert_eq!(piece.rotate(RotationDir::Clockwise), (1, -1));
        assert_eq!(piece.fill_mask(), I_MASKS[1]);
        assert_eq!(piece.rotate(RotationDir::Clockwise), (-1, 1));
        assert_eq!(piece.fill_mask(), I_MASKS[0]);

        // Counter-clockwise crosses the same transition pair.
        assert_eq!(piece.rotate(RotationDir::CounterClockwise), (1, -1));
        assert_eq!(piece.orientation(), 1);
    }

    #[test]
    fn test_box_rotation_is_identity() {
        let mut piece = Piece::new(PieceKind::O, geo());
        for _ in 0..4 {
            assert_eq!(piece.rotate(RotationDir::Clockwise), (0, 0));
            assert_eq!(piece.orientation(), 0);
        }
    }

    #[test]
    fn test_four_clockwise_rotations_net_zero() {
        for kind in [PieceKind::T, PieceKind::J, PieceKind::L] {
            let mut piece = Piece::new(kind, geo());
            let start = piece;
            let mut net = (0, 0);
            for _ in 0..4 {
                let (dx, dy) = piece.rotate(RotationDir::Clockwise);
                net = (net.0 + dx, net.1 + dy);
            }
            assert_eq!(net, (0, 0), "{:?}", kind);
            assert_eq!(piece.orientation(), start.orientation());
            assert_eq!(piece.fill_mask(), start.fill_mask());
        }
    }

    #[test]
    fn test_four_counter_clockwise_rotations_net_zero() {
        for kind in [PieceKind::T, PieceKind::J, PieceKind::L] {
            let mut piece = Piece::new(kind, geo());
            let mut net = (0, 0);
            for _ in 0..4 {
                let (dx, dy) = piece.rotate(RotationDir::CounterClockwise);
                net = (net.0 + dx, net.1 + dy);
            }
            assert_eq!(net, (0, 0), "{:?}", kind);
            assert_eq!(piece.orientation(), 0);
        }
    }

    #[test]
    fn test_negative_rotation_count_normalizes() {
        let mut piece = Piece::new(PieceKind::T, geo());
        piece.rotate(RotationDir::CounterClockwise);
        assert_eq!(piece.orientation(), 3);
        assert_eq!(piece.fill_mask(), T_MASKS[3]);
    }

    #[test]
    fn test_fill_mask_after_does_not_commit() {
        let piece = Piece::new(PieceKind::T, geo());
        assert_eq!(piece.fill_mask_after(RotationDir::Clockwise), T_MASKS[1]);
        assert_eq!(piece.fill_mask_after(RotationDir::CounterClockwise), T_MASKS[3]);
        assert_eq!(piece.fill_mask(), T_MASKS[0]);
        assert_eq!(piece.orientation(), 0);
    }

    #[test]
    fn test_positions_flow_through_frames() {
        let geo = Geometry::new(20, 20, PixelRect::new(40, 20, 200, 200));
        let mut piece = Piece::new(PieceKind::S, geo);
        piece.set_x(4, Frame::Grid);
        piece.set_y(3, Frame::Grid);
        assert_eq!(piece.x(Frame::PlayingField), 2);
        assert_eq!(piece.y(Frame::PlayingField), 2);

        piece.set_x(0, Frame::PlayingField);
        assert_eq!(piece.x(Frame::Grid), 2);
        assert_eq!(piece.x(Frame::Pixel), 40);
    }

    #[test]
    fn test_color_follows_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(Piece::new(kind, geo()).color(), kind.color());
        }
    }
}
