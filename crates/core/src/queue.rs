//! The "coming next" queue of upcoming pieces.

use arrayvec::ArrayVec;
use blockfall_types::MAX_QUEUE_PIECES;

use crate::coordinate::{Coordinate, Frame};
use crate::piece::Piece;

/// Upcoming pieces in play order, stacked under a panel origin so a
/// renderer can draw them directly.
///
/// The head of the queue is the piece that enters play next; it sits
/// topmost in the panel. Pieces are repositioned every time the queue
/// shifts, one `slot_height` of grid rows per slot.
#[derive(Debug, Clone)]
pub struct IncomingQueue {
    origin: Coordinate,
    slot_height: i32,
    pieces: ArrayVec<Piece, MAX_QUEUE_PIECES>,
}

impl IncomingQueue {
    /// Create a queue showing `starting_pieces` below `origin`.
    ///
    /// Panics if given more than [`MAX_QUEUE_PIECES`] pieces.
    pub fn new(
        origin: Coordinate,
        slot_height: i32,
        starting_pieces: impl IntoIterator<Item = Piece>,
    ) -> Self {
        let mut queue = Self {
            origin,
            slot_height,
            pieces: starting_pieces.into_iter().collect(),
        };
        queue.place_on_screen();
        queue
    }

    /// Queued pieces, next-to-play first
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Take the next piece out of the queue, pushing `replacement` in
    /// at the back and restacking the remainder in the panel.
    pub fn play_next_piece(&mut self, replacement: Piece) -> Piece {
        let next = self.pieces.remove(0);
        self.pieces.push(replacement);
        self.place_on_screen();
        next
    }

    // Stack the pieces below the origin, head topmost. The first slot
    // starts one slot_height down so the panel label has room.
    fn place_on_screen(&mut self) {
        let x = self.origin.x(Frame::Grid);
        let y = self.origin.y(Frame::Grid);
        let mut vertical_offset = 0;
        for piece in &mut self.pieces {
            vertical_offset += self.slot_height;
            piece.set_x(x, Frame::Grid);
            piece.set_y(y + vertical_offset, Frame::Grid);
        }
    }
}
