//! Piece construction.

use blockfall_types::PieceKind;

use crate::geometry::Geometry;
use crate::piece::Piece;
use crate::rng::SimpleRng;

/// Builds pieces for one game, drawing kinds uniformly at random.
///
/// Every kind is equally likely on each draw; there is no bag or
/// history, so long runs of the same kind are possible.
#[derive(Debug, Clone)]
pub struct PieceFactory {
    rng: SimpleRng,
    geometry: Geometry,
}

impl PieceFactory {
    pub fn new(seed: u32, geometry: Geometry) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            geometry,
        }
    }

    /// A piece of the given kind, positioned at the grid origin
    pub fn make_piece(&self, kind: PieceKind) -> Piece {
        Piece::new(kind, self.geometry)
    }

    /// A random piece, positioned at the grid origin
    pub fn random_piece(&mut self) -> Piece {
        let index = self.rng.next_range(PieceKind::ALL.len() as u32);
        self.make_piece(PieceKind::ALL[index as usize])
    }
}
