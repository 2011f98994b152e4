//! Board orchestration: one active piece against the settled grid.
//!
//! The board owns the only mutable piece in play. Every movement and
//! rotation is validated here before any state changes, so the grid's
//! `add` should never fail; if it does, the error propagates as a
//! defect rather than being swallowed.

use blockfall_types::{BlockColor, QUEUE_SLOT_HEIGHT, RotationDir};

use crate::coordinate::{Coordinate, Frame};
use crate::factory::PieceFactory;
use crate::geometry::Geometry;
use crate::grid::{BackingGrid, GridError};
use crate::piece::Piece;
use crate::queue::IncomingQueue;

/// What a landing produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    /// False when the piece landed at the spawn row and the game ends
    pub still_playing: bool,
    /// Rows completed and removed by this landing
    pub rows_cleared: u32,
}

/// Drawing surface the board renders into.
///
/// `draw_piece` receives pieces positioned in the grid frame (the
/// incoming queue sits outside the playing field); `draw_tile`
/// receives settled cells in playing-field coordinates.
pub trait Renderer {
    fn draw_piece(&mut self, piece: &Piece);
    fn draw_tile(&mut self, x: i32, y: i32, color: BlockColor);
}

/// One game board: the settled grid, the active piece, and the
/// incoming queue, all sharing a single [`Geometry`].
#[derive(Debug)]
pub struct Board {
    backing_grid: BackingGrid,
    active_piece: Option<Piece>,
    incoming_queue: Option<IncomingQueue>,
    geometry: Geometry,
    spawn_pos: Coordinate,
    queue_panel_pos: Coordinate,
}

impl Board {
    /// `drop_pos` is the grid position where new pieces enter play;
    /// `queue_panel_pos` is the grid position of the "coming next"
    /// panel. Both are plain grid coordinates and may sit outside the
    /// playing field.
    pub fn new(geometry: Geometry, drop_pos: (i32, i32), queue_panel_pos: (i32, i32)) -> Self {
        Self {
            backing_grid: BackingGrid::new(geometry.field_width(), geometry.field_height()),
            active_piece: None,
            incoming_queue: None,
            geometry,
            spawn_pos: Coordinate::new(drop_pos.0, drop_pos.1, geometry, Frame::Grid),
            queue_panel_pos: Coordinate::new(
                queue_panel_pos.0,
                queue_panel_pos.1,
                geometry,
                Frame::Grid,
            ),
        }
    }

    /// Install the opening queue and put the first piece into play at
    /// the spawn position.
    pub fn set_starting_pieces(
        &mut self,
        starting_queue: impl IntoIterator<Item = Piece>,
        active_piece: Piece,
    ) {
        self.incoming_queue = Some(IncomingQueue::new(
            self.queue_panel_pos,
            QUEUE_SLOT_HEIGHT,
            starting_queue,
        ));
        self.spawn(active_piece);
    }

    /// Move the next queued piece into play, drawing its replacement
    /// from `factory`.
    pub fn play_next_piece(&mut self, factory: &mut PieceFactory) {
        let Some(queue) = self.incoming_queue.as_mut() else {
            return;
        };
        let piece = queue.play_next_piece(factory.random_piece());
        self.spawn(piece);
    }

    fn spawn(&mut self, mut piece: Piece) {
        piece.set_x(self.spawn_pos.x(Frame::Grid), Frame::Grid);
        piece.set_y(self.spawn_pos.y(Frame::Grid), Frame::Grid);
        self.active_piece = Some(piece);
    }

    /// Move the active piece one row down. Returns false when the
    /// piece cannot fall further, which is the caller's cue to land it.
    pub fn advance_piece(&mut self) -> bool {
        let Some(mut piece) = self.active_piece else {
            return false;
        };
        if !self.piece_can_move_down(&piece) {
            return false;
        }
        piece.set_y(piece.y(Frame::Grid) + 1, Frame::Grid);
        self.active_piece = Some(piece);
        true
    }

    /// Move the active piece one column left, silently refusing at the
    /// boundary or when settled blocks are in the way.
    pub fn move_left(&mut self) {
        let Some(mut piece) = self.active_piece else {
            return;
        };
        let new_x = piece.x(Frame::PlayingField) - 1;
        if new_x < 0 {
            return;
        }
        if self
            .backing_grid
            .is_collision(new_x, piece.y(Frame::PlayingField), piece.fill_mask())
        {
            return;
        }
        piece.set_x(new_x, Frame::PlayingField);
        self.active_piece = Some(piece);
    }

    /// Move the active piece one column right, silently refusing at
    /// the boundary or when settled blocks are in the way.
    pub fn move_right(&mut self) {
        let Some(mut piece) = self.active_piece else {
            return;
        };
        let new_x = piece.x(Frame::PlayingField) + 1;
        if new_x + piece.width() > self.geometry.field_width() {
            return;
        }
        if self
            .backing_grid
            .is_collision(new_x, piece.y(Frame::PlayingField), piece.fill_mask())
        {
            return;
        }
        piece.set_x(new_x, Frame::PlayingField);
        self.active_piece = Some(piece);
    }

    /// Rotate the active piece counter-clockwise, or leave it exactly
    /// as it was when the rotated placement is illegal.
    pub fn rotate_left(&mut self) {
        self.try_rotation(RotationDir::CounterClockwise);
    }

    /// Rotate the active piece clockwise, or leave it exactly as it
    /// was when the rotated placement is illegal.
    pub fn rotate_right(&mut self) {
        self.try_rotation(RotationDir::Clockwise);
    }

    // Rotation swings the bounding box around, so the delta table
    // shifts the origin to keep the piece visually in place. The
    // rotated placement must clear all four field boundaries and the
    // settled blocks; otherwise the inverse rotation restores the
    // piece bit for bit.
    fn try_rotation(&mut self, dir: RotationDir) {
        let Some(mut piece) = self.active_piece else {
            return;
        };
        let old_x = piece.x(Frame::PlayingField);
        let old_y = piece.y(Frame::PlayingField);

        let (dx, dy) = piece.rotate(dir);
        let new_x = old_x + dx;
        let new_y = old_y + dy;

        let in_bounds = new_x >= 0
            && new_x + piece.width() <= self.geometry.field_width()
            && new_y >= 0
            && new_y + piece.height() <= self.geometry.field_height();

        if in_bounds && !self.backing_grid.is_collision(new_x, new_y, piece.fill_mask()) {
            piece.set_x(new_x, Frame::PlayingField);
            piece.set_y(new_y, Frame::PlayingField);
        } else {
            piece.rotate(dir.inverse());
            piece.set_x(old_x, Frame::PlayingField);
            piece.set_y(old_y, Frame::PlayingField);
        }
        self.active_piece = Some(piece);
    }

    /// Commit the active piece to the grid and clear any completed
    /// rows. Must be called after `advance_piece` returns false.
    ///
    /// A piece that lands while still at the spawn row ends the game;
    /// the grid is left untouched in that case so the final frame
    /// shows the field as it was.
    pub fn on_piece_landed(&mut self) -> Result<PlayOutcome, GridError> {
        let Some(piece) = self.active_piece else {
            return Ok(PlayOutcome {
                still_playing: true,
                rows_cleared: 0,
            });
        };
        if self.detect_game_over(&piece) {
            return Ok(PlayOutcome {
                still_playing: false,
                rows_cleared: 0,
            });
        }
        self.backing_grid.add(&piece)?;
        let rows_cleared = self.backing_grid.clear_filled_rows() as u32;
        Ok(PlayOutcome {
            still_playing: true,
            rows_cleared,
        })
    }

    /// Draw the whole board: the incoming queue, then the settled
    /// blocks, then the active piece on top.
    pub fn render<R: Renderer>(&self, renderer: &mut R) {
        if let Some(queue) = &self.incoming_queue {
            for piece in queue.pieces() {
                renderer.draw_piece(piece);
            }
        }
        for block in self.backing_grid.cells().iter().flatten() {
            renderer.draw_tile(block.x, block.y, block.color);
        }
        // Last so the landing frame shows the piece over the blocks
        // it is about to join.
        if let Some(piece) = &self.active_piece {
            renderer.draw_piece(piece);
        }
    }

    pub fn active_piece(&self) -> Option<&Piece> {
        self.active_piece.as_ref()
    }

    /// Queued upcoming pieces, next-to-play first
    pub fn incoming_pieces(&self) -> &[Piece] {
        self.incoming_queue
            .as_ref()
            .map(|queue| queue.pieces())
            .unwrap_or(&[])
    }

    pub fn backing_grid(&self) -> &BackingGrid {
        &self.backing_grid
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn piece_can_move_down(&self, piece: &Piece) -> bool {
        let piece_bottom = piece.y(Frame::Grid) + piece.height();
        if piece_bottom >= self.geometry.bottom_grid() {
            return false;
        }
        !self.collided_down(piece)
    }

    fn collided_down(&self, piece: &Piece) -> bool {
        self.backing_grid.is_collision(
            piece.x(Frame::PlayingField),
            piece.y(Frame::PlayingField) + 1,
            piece.fill_mask(),
        )
    }

    fn detect_game_over(&self, piece: &Piece) -> bool {
        piece.y(Frame::Grid) <= self.spawn_pos.y(Frame::Grid)
    }

    #[cfg(test)]
    pub(crate) fn backing_grid_mut(&mut self) -> &mut BackingGrid {
        &mut self.backing_grid
    }
}
