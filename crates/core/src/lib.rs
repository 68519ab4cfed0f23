//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and state with **zero dependencies** on
//! UI, networking, or I/O:
//!
//! - **Deterministic**: the piece source is injected, so a seed (or a script)
//!   reproduces a game exactly
//! - **Testable**: rendering is a separate step over [`GameSnapshot`], so the
//!   engine runs headless
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid of colored cells with row clearing
//! - [`pieces`]: shape matrices, the seven-piece catalog, the active piece
//! - [`collision`]: the single placement predicate every mutation goes through
//! - [`game_state`]: move/rotate/drop/lock/clear/pause/restart
//! - [`rng`]: seedable uniform and scripted piece sources
//! - [`scheduler`]: fixed-period automatic drop, suspended while paused/over
//! - [`snapshot`]: borrowed read-only view for renderers
//!
//! # Game Rules
//!
//! - Pieces spawn at (3, 0) on a 10-wide board, drawn uniformly at random
//! - Rotation is a plain clockwise matrix rotation with no wall kicks
//! - A piece that cannot drop locks; every full row clears for 10 points
//! - The game is over when a fresh piece collides at the spawn position
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, TickScheduler};
//! use blockfall_types::{GameAction, GameStatus};
//! use std::time::Duration;
//!
//! let mut game = GameState::new(12345);
//! let mut ticks = TickScheduler::default();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! ticks.run_due(&mut game, Duration::from_millis(500));
//!
//! assert_eq!(game.status(), GameStatus::Running);
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod collision;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scheduler;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::collides;
pub use game_state::{ActionOutcome, DropOutcome, GameState};
pub use pieces::{random_piece, template, ActivePiece, Shape};
pub use rng::{PieceSource, RandomPieces, ScriptedPieces};
pub use scheduler::{TickReport, TickScheduler};
pub use snapshot::GameSnapshot;
