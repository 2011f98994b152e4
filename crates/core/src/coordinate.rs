//! One 2D position, readable and writable in three coordinate frames.

use crate::geometry::Geometry;

/// Frame selector for [`Coordinate`] reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Raw screen pixels, origin at the screen's top-left.
    Pixel,
    /// Block units, origin at the screen's top-left.
    Grid,
    /// Block units, origin at the playing field's top-left corner.
    PlayingField,
}

/// A single position, stored as absolute pixels.
///
/// Reads in the `Grid` and `PlayingField` frames floor toward negative
/// infinity, so sub-block pixel positions collapse to the containing cell
/// and positions left of or above an origin come back negative. Writes in
/// those frames snap the stored pixels to the block grid, which makes
/// grid-frame round trips exact; pixel-frame round trips through a grid
/// frame are lossy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    x: i32,
    y: i32,
    geometry: Geometry,
}

impl Coordinate {
    pub fn new(x: i32, y: i32, geometry: Geometry, frame: Frame) -> Self {
        let mut coord = Coordinate { x: 0, y: 0, geometry };
        coord.set_x(x, frame);
        coord.set_y(y, frame);
        coord
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn x(&self, frame: Frame) -> i32 {
        let block = self.geometry.block_width();
        match frame {
            Frame::Pixel => self.x,
            Frame::Grid => self.x.div_euclid(block),
            Frame::PlayingField => self.x.div_euclid(block) - self.geometry.left_grid(),
        }
    }

    pub fn y(&self, frame: Frame) -> i32 {
        let block = self.geometry.block_height();
        match frame {
            Frame::Pixel => self.y,
            Frame::Grid => self.y.div_euclid(block),
            Frame::PlayingField => self.y.div_euclid(block) - self.geometry.top_grid(),
        }
    }

    pub fn set_x(&mut self, x: i32, frame: Frame) {
        let block = self.geometry.block_width();
        self.x = match frame {
            Frame::Pixel => x,
            Frame::Grid => x * block,
            Frame::PlayingField => (x + self.geometry.left_grid()) * block,
        };
    }

    pub fn set_y(&mut self, y: i32, frame: Frame) {
        let block = self.geometry.block_height();
        self.y = match frame {
            Frame::Pixel => y,
            Frame::Grid => y * block,
            Frame::PlayingField => (y + self.geometry.top_grid()) * block,
        };
    }
}
