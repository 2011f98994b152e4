//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal
//! gameplay. The game view draws the board into a character
//! framebuffer; the terminal renderer flushes that buffer to the real
//! terminal with crossterm.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Allow precise control over aspect ratio (2 chars wide per cell)
//! - Confine terminal I/O to [`renderer`]; everything else is pure

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::GameView;
pub use renderer::TerminalRenderer;
