//! Shared types and constants for the blockfall workspace.
//!
//! Everything here is plain data with no dependencies, usable from the core
//! engine, the session layer, and the terminal front end alike. Geometry is
//! deliberately absent: block sizes and field rectangles are runtime
//! configuration owned by the binary, not workspace-wide constants.
//!
//! # Timing constants
//!
//! All values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_FALL_MS` | 1000 | Auto-fall interval before speedup |
//! | `FALL_SPEEDUP_MS` | 90 | Interval reduction per difficulty level |
//!
//! The auto-fall interval at difficulty `d` is
//! `BASE_FALL_MS - d * FALL_SPEEDUP_MS`, saturating at zero. Difficulty 1
//! gives 910ms per row, difficulty 5 gives 550ms, and from difficulty 12
//! onward the piece falls every tick.
//!
//! # Scoring constants
//!
//! Clearing `n` rows at difficulty `d` scores `n * ROW_CLEAR_BASE * n * d`
//! points. Hard drops initiated within `DROP_BONUS_STEPS` natural fall
//! steps earn a bonus that shrinks the longer the piece has already
//! fallen. Difficulty advances every `ROWS_PER_LEVEL` cleared rows.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{BlockColor, PieceKind, RotationDir};
//!
//! let kind = PieceKind::T;
//! assert_eq!(kind.color(), BlockColor::Blue);
//!
//! let dir = RotationDir::Clockwise;
//! assert_eq!(dir.step(), 1);
//! assert_eq!(dir.inverse().step(), -1);
//! ```

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Auto-fall interval before any difficulty speedup (1 second per row)
pub const BASE_FALL_MS: u32 = 1000;

/// Auto-fall interval reduction per difficulty level
pub const FALL_SPEEDUP_MS: u32 = 90;

/// Rows cleared per difficulty level
pub const ROWS_PER_LEVEL: u32 = 7;

/// Base points multiplier for row clears
pub const ROW_CLEAR_BASE: u32 = 10;

/// Pieces landed within this many fall steps earn the placement bonus
pub const LANDING_BONUS_STEPS: u32 = 5;

/// Hard drops initiated within this many fall steps earn the drop bonus
pub const DROP_BONUS_STEPS: u32 = 7;

/// Number of upcoming pieces kept in the incoming queue
pub const INCOMING_QUEUE_SIZE: usize = 3;

/// Capacity bound for the incoming queue's backing storage
pub const MAX_QUEUE_PIECES: usize = 8;

/// Vertical grid rows reserved per piece in the queue panel
pub const QUEUE_SLOT_HEIGHT: i32 = 3;

/// The seven falling-piece kinds
///
/// Each kind has a fixed color:
/// - **I**: Yellow, 4x1 bar
/// - **O**: Green, 2x2 box
/// - **T**: Blue, T-shaped
/// - **S**: Red, S-shaped
/// - **Z**: Orange, Z-shaped (mirror of S)
/// - **J**: Brown, J-shaped
/// - **L**: Purple, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in a fixed order suitable for uniform random draws
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::ALL.len(), 7);
    /// assert_eq!(PieceKind::ALL[0], PieceKind::I);
    /// ```
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// The color every piece of this kind carries
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::{BlockColor, PieceKind};
    ///
    /// assert_eq!(PieceKind::I.color(), BlockColor::Yellow);
    /// assert_eq!(PieceKind::L.color(), BlockColor::Purple);
    /// ```
    pub fn color(&self) -> BlockColor {
        match self {
            PieceKind::I => BlockColor::Yellow,
            PieceKind::O => BlockColor::Green,
            PieceKind::T => BlockColor::Blue,
            PieceKind::S => BlockColor::Red,
            PieceKind::Z => BlockColor::Orange,
            PieceKind::J => BlockColor::Brown,
            PieceKind::L => BlockColor::Purple,
        }
    }
}

/// Color tag carried by settled blocks and falling pieces
///
/// One color per piece kind; the renderer decides how each is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockColor {
    Yellow,
    Green,
    Blue,
    Red,
    Orange,
    Brown,
    Purple,
}

/// Direction of a single 90° rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDir {
    Clockwise,
    CounterClockwise,
}

impl RotationDir {
    /// Signed step applied to a piece's orientation index
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::RotationDir;
    ///
    /// assert_eq!(RotationDir::Clockwise.step(), 1);
    /// assert_eq!(RotationDir::CounterClockwise.step(), -1);
    /// ```
    pub fn step(&self) -> i32 {
        match self {
            RotationDir::Clockwise => 1,
            RotationDir::CounterClockwise => -1,
        }
    }

    /// The direction that undoes this one
    pub fn inverse(&self) -> Self {
        match self {
            RotationDir::Clockwise => RotationDir::CounterClockwise,
            RotationDir::CounterClockwise => RotationDir::Clockwise,
        }
    }
}

/// Player commands the game session understands
///
/// Pause and quit never reach the session; the main loop consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the piece one cell left
    MoveLeft,
    /// Move the piece one cell right
    MoveRight,
    /// Advance the piece one cell down (may trigger landing)
    MoveDown,
    /// Rotate the piece counter-clockwise
    RotateLeft,
    /// Rotate the piece clockwise
    RotateRight,
    /// Drop the piece straight to the bottom
    Drop,
}
