//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules: geometry, coordinate
//! frames, piece shapes and rotation, the settled-block grid, and the
//! board that orchestrates them. It has **zero dependencies** on UI,
//! timing, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Every rule is covered headlessly, no display needed
//! - **Portable**: The same core drives the terminal front end and tests
//!
//! # Module Structure
//!
//! - [`geometry`]: block size and playing-field rectangle configuration
//! - [`coordinate`]: one position, readable in pixel/grid/field frames
//! - [`piece`]: the seven piece kinds, their fill masks and rotation deltas
//! - [`grid`]: settled-block store with collision and row clearing
//! - [`board`]: active piece vs. grid, movement legality, landing
//! - [`queue`]: the "coming next" queue shown beside the field
//! - [`factory`]: piece construction with seeded uniform kind draws
//! - [`rng`]: the LCG behind the factory
//! - [`scoring`]: score and difficulty accounting
//!
//! # Coordinate frames
//!
//! Every position is stored in absolute pixels and read through a
//! [`Frame`]: raw pixels, whole-screen grid cells, or cells relative
//! to the playing field's top-left corner. The grid works entirely in
//! the playing-field frame; pieces travel in the grid frame so the
//! incoming queue can sit outside the field.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Board, Frame, Geometry, PieceFactory, PixelRect};
//! use blockfall_types::PieceKind;
//!
//! let geometry = Geometry::new(20, 20, PixelRect::new(0, 0, 200, 200));
//! let mut factory = PieceFactory::new(12345, geometry);
//! let mut board = Board::new(geometry, (4, 0), (12, 1));
//!
//! let queue = [
//!     factory.random_piece(),
//!     factory.random_piece(),
//!     factory.random_piece(),
//! ];
//! board.set_starting_pieces(queue, factory.make_piece(PieceKind::O));
//!
//! assert!(board.advance_piece());
//! assert_eq!(board.active_piece().unwrap().y(Frame::Grid), 1);
//! ```

pub mod board;
pub mod coordinate;
pub mod factory;
pub mod geometry;
pub mod grid;
pub mod piece;
pub mod queue;
pub mod rng;
pub mod scoring;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, PlayOutcome, Renderer};
pub use coordinate::{Coordinate, Frame};
pub use factory::PieceFactory;
pub use geometry::{Geometry, PixelRect};
pub use grid::{BackingGrid, Block, Cell, GridError};
pub use piece::{fill_masks, FillMask, Piece};
pub use queue::IncomingQueue;
pub use rng::SimpleRng;
pub use scoring::ScoreKeeper;
