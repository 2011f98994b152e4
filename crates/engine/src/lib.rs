//! Game session driver
//!
//! Ties the core board, piece supply, and score keeper to a fall
//! timer. The binary feeds in elapsed time and decoded player actions;
//! nothing here touches the terminal or the clock directly, so whole
//! games can be simulated headlessly in tests.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Geometry, PixelRect};
//! use blockfall_engine::Gameplay;
//! use blockfall_types::GameAction;
//!
//! let geometry = Geometry::new(20, 20, PixelRect::new(0, 0, 200, 200));
//! let mut session = Gameplay::new(geometry, (4, 0), (12, 1), 12345);
//!
//! // Dropping the first piece lands it and scores the drop bonus.
//! let playing = session.on_tick(16, Some(GameAction::Drop)).unwrap();
//! assert!(playing);
//! assert!(session.score() > 0);
//! ```

pub mod session;

pub use session::Gameplay;
