//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the engine, the terminal renderer and the leaderboard client alike.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Spawn position**: (3, 0) for every piece
//!
//! # Timing and Scoring
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 500 | Automatic drop period |
//! | `LINE_CLEAR_POINTS` | 10 | Points per cleared row |
//! | `LEADERBOARD_TOP_N` | 10 | Default leaderboard length |
//! | `TAP_THRESHOLD_PX` | 10 | Gestures below this on both axes are taps |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, Color, PieceKind, BOARD_COLS, BOARD_ROWS};
//!
//! assert_eq!(PieceKind::ALL[PieceKind::O.index()], PieceKind::O);
//!
//! let cell: Cell = Some(Color::RED);
//! assert_eq!(cell.map(|c| c.r), Some(0xff));
//! assert_eq!((BOARD_ROWS, BOARD_COLS), (20, 10));
//! ```

/// Board height in cells (20 rows)
pub const BOARD_ROWS: usize = 20;

/// Board width in cells (10 columns)
pub const BOARD_COLS: usize = 10;

/// Spawn column for new pieces
pub const SPAWN_X: i32 = 3;

/// Spawn row for new pieces
pub const SPAWN_Y: i32 = 0;

/// Automatic drop period in milliseconds
pub const TICK_MS: u32 = 500;

/// Points awarded for every cleared row
pub const LINE_CLEAR_POINTS: u32 = 10;

/// Default number of leaderboard entries to fetch and display
pub const LEADERBOARD_TOP_N: usize = 10;

/// Largest leaderboard page the service hands out
pub const LEADERBOARD_MAX_N: usize = 100;

/// Displacement (in pointer units) below which a gesture counts as a tap
pub const TAP_THRESHOLD_PX: f32 = 10.0;

/// 24-bit cell color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);
    pub const GREEN: Color = Color::new(0x00, 0xff, 0x00);
    pub const BLUE: Color = Color::new(0x00, 0x00, 0xff);
    pub const YELLOW: Color = Color::new(0xff, 0xff, 0x00);
    pub const MAGENTA: Color = Color::new(0xff, 0x00, 0xff);
    pub const CYAN: Color = Color::new(0x00, 0xff, 0xff);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The seven tetromino piece kinds, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    T,
    I,
    O,
    S,
    Z,
    L,
    J,
}

impl PieceKind {
    /// Number of piece kinds
    pub const LEN: usize = 7;

    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Game status
///
/// Running and Paused toggle into each other; Over is terminal until restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Running,
    Paused,
    Over,
}

impl GameStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, GameStatus::Running)
    }
}

/// Game actions produced by input collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one row (locks when blocked)
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Toggle pause state
    Pause,
    /// Restart the game from any state
    Restart,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled by a locked piece of that color
pub type Cell = Option<Color>;
