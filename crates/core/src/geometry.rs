//! Pixel-to-grid configuration shared by every position in a game.

/// Pixel rectangle, upper-left and lower-right corners in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        PixelRect {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Immutable translation between pixel space and grid space.
///
/// Holds the block dimensions and the playing field's pixel rectangle.
/// The rectangle is assumed aligned to whole blocks; an unaligned edge
/// floors to the boundary of the block containing it. Cheap to copy, so
/// it travels by value with every [`Coordinate`](crate::Coordinate).
///
/// # Examples
///
/// ```
/// use blockfall_core::{Geometry, PixelRect};
///
/// let geo = Geometry::new(25, 25, PixelRect::new(125, 75, 475, 500));
/// assert_eq!(geo.field_width(), 14);
/// assert_eq!(geo.field_height(), 17);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    block_width: i32,
    block_height: i32,
    field: PixelRect,
}

impl Geometry {
    pub fn new(block_width: i32, block_height: i32, field: PixelRect) -> Self {
        Geometry {
            block_width,
            block_height,
            field,
        }
    }

    pub fn block_width(&self) -> i32 {
        self.block_width
    }

    pub fn block_height(&self) -> i32 {
        self.block_height
    }

    /// Playing-field width in grid cells.
    pub fn field_width(&self) -> i32 {
        self.right_grid() - self.left_grid()
    }

    /// Playing-field height in grid cells.
    pub fn field_height(&self) -> i32 {
        self.bottom_grid() - self.top_grid()
    }

    pub fn left_px(&self) -> i32 {
        self.field.left
    }

    pub fn top_px(&self) -> i32 {
        self.field.top
    }

    pub fn right_px(&self) -> i32 {
        self.field.right
    }

    pub fn bottom_px(&self) -> i32 {
        self.field.bottom
    }

    /// Field boundaries in absolute grid units, floored toward the
    /// containing block.
    pub fn left_grid(&self) -> i32 {
        self.field.left.div_euclid(self.block_width)
    }

    pub fn top_grid(&self) -> i32 {
        self.field.top.div_euclid(self.block_height)
    }

    pub fn right_grid(&self) -> i32 {
        self.field.right.div_euclid(self.block_width)
    }

    pub fn bottom_grid(&self) -> i32 {
        self.field.bottom.div_euclid(self.block_height)
    }
}
