//! GameView: maps the board and score into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use blockfall_core::{Board, Frame, Geometry, Piece, Renderer, ScoreKeeper};
use blockfall_types::{BlockColor, INCOMING_QUEUE_SIZE, QUEUE_SLOT_HEIGHT};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

// Terminal columns reserved for the side panel text.
const PANEL_TEXT_COLS: u16 = 12;

/// Draws the whole game screen into a [`FrameBuffer`].
///
/// Grid cells map to blocks of terminal characters (2x1 by default,
/// which compensates for the typical glyph aspect ratio). The view
/// implements the board's [`Renderer`] contract, so pieces and settled
/// blocks draw themselves through it.
pub struct GameView {
    fb: FrameBuffer,
    geometry: Geometry,
    queue_panel_pos: (i32, i32),
    cell_w: u16,
    cell_h: u16,
}

impl GameView {
    /// `queue_panel_pos` is the grid position of the "coming next"
    /// panel, matching what the board was built with.
    pub fn new(geometry: Geometry, queue_panel_pos: (i32, i32)) -> Self {
        let cell_w = 2;
        let cell_h = 1;

        // Wide enough for the field plus the panel text, tall enough
        // for the field with its border and the panel's score block.
        let field_cols = (geometry.right_grid() as u16 + 1) * cell_w;
        let panel_cols = queue_panel_pos.0 as u16 * cell_w + PANEL_TEXT_COLS;
        let field_rows = (geometry.bottom_grid() as u16 + 2) * cell_h;
        let panel_rows = Self::score_block_row(queue_panel_pos) + 8;

        Self {
            fb: FrameBuffer::new(field_cols.max(panel_cols), field_rows.max(panel_rows)),
            geometry,
            queue_panel_pos,
            cell_w,
            cell_h,
        }
    }

    /// Render one frame, with an optional banner (pause, game over)
    /// centered on the field. The returned framebuffer is owned by
    /// the view and reused across frames.
    pub fn render(
        &mut self,
        board: &Board,
        score: &ScoreKeeper,
        overlay: Option<&str>,
    ) -> &FrameBuffer {
        self.fb.clear(Cell::default());
        self.draw_field_background();
        self.draw_field_border();
        board.render(self);
        self.draw_side_panel(score);
        if let Some(text) = overlay {
            self.draw_overlay_text(text);
        }
        &self.fb
    }

    // One grid cell as a rectangle of terminal characters. Cells above
    // or left of the screen are clipped here; the framebuffer clips
    // the other two edges.
    fn draw_grid_cell(&mut self, grid_x: i32, grid_y: i32, ch: char, style: CellStyle) {
        if grid_x < 0 || grid_y < 0 {
            return;
        }
        let px = grid_x as u16 * self.cell_w;
        let py = grid_y as u16 * self.cell_h;
        self.fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_field_background(&mut self) {
        let style = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg: Rgb::new(30, 30, 40),
            bold: false,
            dim: true,
        };
        let x = self.geometry.left_grid() as u16 * self.cell_w;
        let y = self.geometry.top_grid() as u16 * self.cell_h;
        let w = self.geometry.field_width() as u16 * self.cell_w;
        let h = self.geometry.field_height() as u16 * self.cell_h;
        self.fb.fill_rect(x, y, w, h, '·', style);
    }

    fn draw_field_border(&mut self) {
        let style = CellStyle {
            fg: Rgb::new(200, 200, 200),
            ..CellStyle::default()
        };
        let x = (self.geometry.left_grid() as u16 * self.cell_w).saturating_sub(1);
        let y = (self.geometry.top_grid() as u16 * self.cell_h).saturating_sub(1);
        let w = self.geometry.field_width() as u16 * self.cell_w + 2;
        let h = self.geometry.field_height() as u16 * self.cell_h + 2;

        self.fb.put_char(x, y, '┌', style);
        self.fb.put_char(x + w - 1, y, '┐', style);
        self.fb.put_char(x, y + h - 1, '└', style);
        self.fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            self.fb.put_char(x + dx, y, '─', style);
            self.fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            self.fb.put_char(x, y + dy, '│', style);
            self.fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_side_panel(&mut self, score: &ScoreKeeper) {
        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            ..CellStyle::default()
        };

        let x = self.queue_panel_pos.0 as u16 * self.cell_w;
        self.fb
            .put_str(x, self.queue_panel_pos.1 as u16 * self.cell_h, "NEXT", label);

        // The queued pieces draw themselves into the slots below the
        // label; the score block starts under the last slot.
        let y = Self::score_block_row(self.queue_panel_pos);
        self.fb.put_str(x, y, "SCORE", label);
        self.fb.put_str(x, y + 1, &score.score().to_string(), value);
        self.fb.put_str(x, y + 3, "ROWS", label);
        self.fb.put_str(x, y + 4, &score.rows().to_string(), value);
        self.fb.put_str(x, y + 6, "LEVEL", label);
        self.fb.put_str(x, y + 7, &score.difficulty().to_string(), value);
    }

    fn draw_overlay_text(&mut self, text: &str) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bold: true,
            ..CellStyle::default()
        };
        let left = self.geometry.left_grid() as u16 * self.cell_w;
        let field_cols = self.geometry.field_width() as u16 * self.cell_w;
        let x = left + field_cols.saturating_sub(text.chars().count() as u16) / 2;
        let y = (self.geometry.top_grid() + self.geometry.field_height() / 2) as u16 * self.cell_h;
        self.fb.put_str(x, y, text, style);
    }

    fn score_block_row(queue_panel_pos: (i32, i32)) -> u16 {
        (queue_panel_pos.1 + QUEUE_SLOT_HEIGHT * (INCOMING_QUEUE_SIZE as i32 + 1)) as u16
    }
}

impl Renderer for GameView {
    fn draw_piece(&mut self, piece: &Piece) {
        let grid_x = piece.x(Frame::Grid);
        let grid_y = piece.y(Frame::Grid);
        let style = block_style(piece.color());
        for (row, cells) in piece.fill_mask().iter().enumerate() {
            for (col, &filled) in cells.iter().enumerate() {
                if filled == 1 {
                    self.draw_grid_cell(grid_x + col as i32, grid_y + row as i32, '█', style);
                }
            }
        }
    }

    fn draw_tile(&mut self, x: i32, y: i32, color: BlockColor) {
        let grid_x = x + self.geometry.left_grid();
        let grid_y = y + self.geometry.top_grid();
        self.draw_grid_cell(grid_x, grid_y, '█', block_style(color));
    }
}

fn block_style(color: BlockColor) -> CellStyle {
    let fg = match color {
        BlockColor::Yellow => Rgb::new(240, 220, 80),
        BlockColor::Green => Rgb::new(100, 220, 120),
        BlockColor::Blue => Rgb::new(80, 120, 220),
        BlockColor::Red => Rgb::new(220, 80, 80),
        BlockColor::Orange => Rgb::new(255, 165, 0),
        BlockColor::Brown => Rgb::new(160, 100, 60),
        BlockColor::Purple => Rgb::new(200, 120, 220),
    };
    CellStyle {
        fg,
        bg: Rgb::new(30, 30, 40),
        bold: true,
        dim: false,
    }
}
