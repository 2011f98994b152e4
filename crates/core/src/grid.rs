//! The settled-block store: every piece that will never move again,
//! flattened into one grid for collision checks and row clearing.

use blockfall_types::BlockColor;

use crate::coordinate::Frame;
use crate::piece::{FillMask, Piece};

/// A settled cell's payload.
///
/// `x` and `y` repeat the cell's playing-field position so a renderer
/// walking the flattened cell list needs no knowledge of the grid shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub x: i32,
    pub y: i32,
    pub color: BlockColor,
}

/// One grid cell, empty or holding a settled block.
pub type Cell = Option<Block>;

/// Commit failures from [`BackingGrid::add`].
///
/// Both mean a legality check upstream was skipped; neither is a
/// recoverable in-game condition.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum GridError {
    #[error("piece at ({x}, {y}) with size {width}x{height} is out of bounds")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    #[error("cell ({x}, {y}) is already occupied")]
    AlreadyOccupied { x: i32, y: i32 },
}

/// Fixed-size store of settled blocks, addressed row-major.
#[derive(Debug, Clone)]
pub struct BackingGrid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl BackingGrid {
    pub fn new(width: i32, height: i32) -> Self {
        BackingGrid {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(x >= 0 && x < self.width && y >= 0 && y < self.height);
        (y * self.width + x) as usize
    }

    /// Commits the piece's filled cells at its current playing-field
    /// position. All target cells are validated for bounds and occupancy
    /// before any cell is written, so a failed add changes nothing.
    pub fn add(&mut self, piece: &Piece) -> Result<(), GridError> {
        let x = piece.x(Frame::PlayingField);
        let y = piece.y(Frame::PlayingField);
        let width = piece.width();
        let height = piece.height();
        if x < 0 || y < 0 || x + width > self.width || y + height > self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width,
                height,
            });
        }

        let mask = piece.fill_mask();
        for (row, bits) in mask.iter().enumerate() {
            for (col, &bit) in bits.iter().enumerate() {
                if bit == 1 {
                    let cx = x + col as i32;
                    let cy = y + row as i32;
                    if self.cells[self.index(cx, cy)].is_some() {
                        return Err(GridError::AlreadyOccupied { x: cx, y: cy });
                    }
                }
            }
        }

        let color = piece.color();
        for (row, bits) in mask.iter().enumerate() {
            for (col, &bit) in bits.iter().enumerate() {
                if bit == 1 {
                    let cx = x + col as i32;
                    let cy = y + row as i32;
                    let index = self.index(cx, cy);
                    self.cells[index] = Some(Block { x: cx, y: cy, color });
                }
            }
        }
        Ok(())
    }

    /// True if any filled mask cell overlaps a settled block, with the
    /// mask's top-left at field position `(x, y)`.
    ///
    /// The grid holds no data for negative rows, so a mask reaching above
    /// the field (a tall piece rotated near the spawn point) is clipped:
    /// only rows from `-y` down are tested. `x` must be in bounds.
    pub fn is_collision(&self, x: i32, y: i32, mask: FillMask) -> bool {
        let (mask, y) = if y < 0 {
            (mask.get(-y as usize..).unwrap_or(&[]), 0)
        } else {
            (mask, y)
        };

        for (row, bits) in mask.iter().enumerate() {
            for (col, &bit) in bits.iter().enumerate() {
                if bit == 1 {
                    let index = self.index(x + col as i32, y + row as i32);
                    if self.cells[index].is_some() {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn is_row_full(&self, y: i32) -> bool {
        let start = (y * self.width) as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Removes every full row and collapses the rows above, in a single
    /// bottom-up pass. Each surviving block's stored `y` is shifted with
    /// it. Returns the number of rows removed.
    pub fn clear_filled_rows(&mut self) -> usize {
        let width = self.width as usize;
        let mut cleared = 0;
        let mut write_y = self.height;
        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let shift = write_y - read_y;
                let src = (read_y * self.width) as usize;
                let dst = (write_y * self.width) as usize;
                for col in 0..width {
                    let mut cell = self.cells[src + col];
                    if let Some(block) = cell.as_mut() {
                        block.y += shift;
                    }
                    self.cells[dst + col] = cell;
                }
            }
        }
        // Rows above the last surviving row are newly exposed.
        for cell in &mut self.cells[..(write_y * self.width) as usize] {
            *cell = None;
        }
        cleared
    }

    /// Read-only row-major view of every cell, for rendering.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Geometry, PixelRect};
    use blockfall_types::{PieceKind, RotationDir};

    const SINGLE_BLOCK: FillMask = &[&[1]];

    fn geo() -> Geometry {
        Geometry::new(20, 20, PixelRect::new(0, 0, 200, 200))
    }

    fn piece_at(kind: PieceKind, x: i32, y: i32) -> Piece {
        let mut piece = Piece::new(kind, geo());
        piece.set_x(x, Frame::Grid);
        piece.set_y(y, Frame::Grid);
        piece
    }

    fn vertical_bar_at(x: i32, y: i32) -> Piece {
        let mut piece = Piece::new(PieceKind::I, geo());
        piece.rotate(RotationDir::Clockwise);
        piece.set_x(x, Frame::Grid);
        piece.set_y(y, Frame::Grid);
        piece
    }

    fn assert_row_empty(grid: &BackingGrid, y: i32) {
        for x in 0..grid.width() {
            assert!(
                !grid.is_collision(x, y, SINGLE_BLOCK),
                "space ({}, {}) was not empty but should have been",
                x,
                y
            );
        }
    }

    fn assert_row_state(grid: &BackingGrid, y: i32, expected: [u8; 10]) {
        for (x, &want) in expected.iter().enumerate() {
            let filled = grid.is_collision(x as i32, y, SINGLE_BLOCK);
            assert_eq!(filled, want == 1, "space ({}, {})", x, y);
        }
    }

    #[test]
    fn test_iterate_over_empty_grid() {
        let grid = BackingGrid::new(10, 10);
        assert_eq!(grid.cells().len(), 100);
        assert!(grid.cells().iter().all(|cell| cell.is_none()));
    }

    #[test]
    fn test_iterate_over_nonempty_grid() {
        let mut grid = BackingGrid::new(10, 10);
        grid.add(&piece_at(PieceKind::O, 0, 0)).unwrap();

        let cells = grid.cells();
        let green = PieceKind::O.color();
        assert_eq!(cells[0], Some(Block { x: 0, y: 0, color: green }));
        assert_eq!(cells[1], Some(Block { x: 1, y: 0, color: green }));
        assert_eq!(cells[10], Some(Block { x: 0, y: 1, color: green }));
        assert_eq!(cells[11], Some(Block { x: 1, y: 1, color: green }));

        for (index, cell) in cells.iter().enumerate() {
            if ![0, 1, 10, 11].contains(&index) {
                assert_eq!(*cell, None, "cell {}", index);
            }
        }
    }

    #[test]
    fn test_box_collision() {
        let mut grid = BackingGrid::new(10, 10);
        let piece = piece_at(PieceKind::O, 0, 0);
        grid.add(&piece).unwrap();

        let mask = piece.fill_mask();
        assert!(grid.is_collision(1, 1, mask));
        assert!(grid.is_collision(0, 0, mask));
        assert!(grid.is_collision(1, 0, mask));
        assert!(grid.is_collision(0, 1, mask));
        assert!(!grid.is_collision(2, 0, mask));
    }

    #[test]
    fn test_tee_collision() {
        let mut grid = BackingGrid::new(10, 10);
        let piece = piece_at(PieceKind::T, 0, 0);
        grid.add(&piece).unwrap();

        let mask = piece.fill_mask();
        assert!(grid.is_collision(1, 1, mask));
        assert!(grid.is_collision(0, 1, mask));
        assert!(!grid.is_collision(2, 2, mask));
    }

    #[test]
    fn test_collision_clips_rows_above_field() {
        let mut grid = BackingGrid::new(10, 10);
        grid.add(&piece_at(PieceKind::O, 0, 0)).unwrap();

        let tall = vertical_bar_at(0, 0);
        // Two rows clipped, remaining rows land on the settled box.
        assert!(grid.is_collision(0, -2, tall.fill_mask()));
        // Clipping past the mask never reports a collision.
        assert!(!grid.is_collision(0, -4, tall.fill_mask()));
        assert!(!grid.is_collision(2, -2, tall.fill_mask()));
    }

    #[test]
    fn test_add_overlapping_fails() {
        let mut grid = BackingGrid::new(10, 10);
        grid.add(&piece_at(PieceKind::O, 0, 0)).unwrap();

        let result = grid.add(&piece_at(PieceKind::O, 1, 1));
        assert_eq!(result, Err(GridError::AlreadyOccupied { x: 1, y: 1 }));
    }

    #[test]
    fn test_add_adjacent_succeeds() {
        let mut grid = BackingGrid::new(10, 10);
        grid.add(&piece_at(PieceKind::O, 0, 0)).unwrap();
        grid.add(&piece_at(PieceKind::O, 2, 1)).unwrap();
    }

    #[test]
    fn test_add_partially_out_of_bounds_right() {
        let mut grid = BackingGrid::new(10, 10);
        // The origin is in bounds, the piece width pushes it out.
        let result = grid.add(&piece_at(PieceKind::O, 9, 0));
        assert_eq!(
            result,
            Err(GridError::OutOfBounds { x: 9, y: 0, width: 2, height: 2 })
        );
    }

    #[test]
    fn test_add_partially_out_of_bounds_bottom() {
        let mut grid = BackingGrid::new(10, 10);
        let result = grid.add(&piece_at(PieceKind::O, 0, 9));
        assert!(matches!(result, Err(GridError::OutOfBounds { .. })));
    }

    #[test]
    fn test_add_partially_out_of_bounds_left() {
        let mut grid = BackingGrid::new(10, 10);
        let result = grid.add(&piece_at(PieceKind::O, -1, 0));
        assert!(matches!(result, Err(GridError::OutOfBounds { .. })));
    }

    #[test]
    fn test_add_partially_out_of_bounds_top() {
        let mut grid = BackingGrid::new(10, 10);
        let result = grid.add(&piece_at(PieceKind::O, 0, -1));
        assert!(matches!(result, Err(GridError::OutOfBounds { .. })));
    }

    #[test]
    fn test_add_fully_out_of_bounds() {
        let mut grid = BackingGrid::new(10, 10);
        let result = grid.add(&piece_at(PieceKind::O, 10, 0));
        assert!(matches!(result, Err(GridError::OutOfBounds { .. })));
    }

    #[test]
    fn test_failed_add_changes_nothing() {
        let mut grid = BackingGrid::new(10, 10);
        grid.add(&piece_at(PieceKind::O, 0, 0)).unwrap();
        let before = grid.cells().to_vec();

        assert!(grid.add(&piece_at(PieceKind::O, 1, 1)).is_err());
        assert_eq!(grid.cells(), &before[..]);

        assert!(grid.add(&piece_at(PieceKind::O, 9, 9)).is_err());
        assert_eq!(grid.cells(), &before[..]);
    }

    #[test]
    fn test_clear_with_no_full_rows_is_noop() {
        let mut grid = BackingGrid::new(10, 10);
        grid.add(&piece_at(PieceKind::O, 0, 8)).unwrap();
        grid.add(&piece_at(PieceKind::T, 4, 8)).unwrap();
        let before = grid.cells().to_vec();

        assert_eq!(grid.clear_filled_rows(), 0);
        assert_eq!(grid.cells(), &before[..]);
    }

    #[test]
    fn test_new_piece_completes_bottom_row() {
        // Before:            After:
        // y=8: ........33    y=8: ..........
        // y=9: 1111222233    y=9: ........33
        let mut grid = BackingGrid::new(10, 10);
        grid.add(&piece_at(PieceKind::I, 0, 9)).unwrap();
        grid.add(&piece_at(PieceKind::I, 4, 9)).unwrap();
        assert_eq!(grid.clear_filled_rows(), 0);
        grid.add(&piece_at(PieceKind::O, 8, 8)).unwrap();
        assert_eq!(grid.clear_filled_rows(), 1);

        assert_row_empty(&grid, 8);
        assert_row_state(&grid, 9, [0, 0, 0, 0, 0, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_new_piece_completes_top_row() {
        // Nothing sits above the cleared row, so clearing degenerates to
        // truncation and the box's bottom half stays put.
        let mut grid = BackingGrid::new(10, 10);
        grid.add(&piece_at(PieceKind::I, 0, 0)).unwrap();
        grid.add(&piece_at(PieceKind::I, 4, 0)).unwrap();
        assert_eq!(grid.clear_filled_rows(), 0);
        grid.add(&piece_at(PieceKind::O, 8, 0)).unwrap();
        assert_eq!(grid.clear_filled_rows(), 1);

        assert_row_empty(&grid, 0);
        assert_row_state(&grid, 1, [0, 0, 0, 0, 0, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_new_piece_completes_nonbottom_row() {
        // Before:            After:
        // y=7: 11112222xx    y=7: ..........
        // y=8: .....33.xx    y=8: .....33.xx
        // y=9: .....33...    y=9: .....33...
        let mut grid = BackingGrid::new(10, 10);
        grid.add(&piece_at(PieceKind::I, 0, 7)).unwrap();
        grid.add(&piece_at(PieceKind::I, 4, 7)).unwrap();
        grid.add(&piece_at(PieceKind::O, 5, 8)).unwrap();
        assert_eq!(grid.clear_filled_rows(), 0);
        grid.add(&piece_at(PieceKind::O, 8, 7)).unwrap();
        assert_eq!(grid.clear_filled_rows(), 1);

        assert_row_empty(&grid, 7);
        assert_row_state(&grid, 8, [0, 0, 0, 0, 0, 1, 1, 0, 1, 1]);
        assert_row_state(&grid, 9, [0, 0, 0, 0, 0, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_piece_completes_noncontiguous_rows() {
        // Before:            After:
        // y=6: ........56    y=6: ..........
        // y=7: 3333444456    y=7: ..........
        // y=8: ........56    y=8: ........56
        // y=9: 1111222256    y=9: ........56
        let mut grid = BackingGrid::new(10, 10);
        grid.add(&piece_at(PieceKind::I, 0, 9)).unwrap();
        grid.add(&piece_at(PieceKind::I, 4, 9)).unwrap();
        grid.add(&piece_at(PieceKind::I, 0, 7)).unwrap();
        grid.add(&piece_at(PieceKind::I, 4, 7)).unwrap();
        grid.add(&vertical_bar_at(8, 6)).unwrap();
        assert_eq!(grid.clear_filled_rows(), 0);
        grid.add(&vertical_bar_at(9, 6)).unwrap();
        assert_eq!(grid.clear_filled_rows(), 2);

        assert_row_empty(&grid, 6);
        assert_row_empty(&grid, 7);
        assert_row_state(&grid, 8, [0, 0, 0, 0, 0, 0, 0, 0, 1, 1]);
        assert_row_state(&grid, 9, [0, 0, 0, 0, 0, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_cleared_blocks_keep_their_stored_position() {
        let mut grid = BackingGrid::new(10, 10);
        grid.add(&piece_at(PieceKind::I, 0, 9)).unwrap();
        grid.add(&piece_at(PieceKind::I, 4, 9)).unwrap();
        grid.add(&piece_at(PieceKind::O, 8, 8)).unwrap();
        grid.clear_filled_rows();

        for (index, cell) in grid.cells().iter().enumerate() {
            if let Some(block) = cell {
                assert_eq!(block.x, index as i32 % 10);
                assert_eq!(block.y, index as i32 / 10);
            }
        }
    }
}
