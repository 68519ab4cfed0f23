//! Leaderboard module - named high scores with upsert-if-greater semantics
//!
//! The same table type backs both sides: the HTTP service persists it to a
//! JSON file, and the game client talks to the service through
//! [`LeaderboardClient`] on a background runtime so the game loop never
//! blocks on the network.
//!
//! # Wire format
//!
//! ```text
//! GET  /leaderboard?limit=3   -> [{"name":"B","score":30},{"name":"C","score":20}]
//! POST /submit-score          <- {"name":"Ada","score":50}
//!                             -> {"outcome":"inserted","score":50}
//! GET  /health                -> ok
//! ```

pub mod client;
pub mod dispatch;
pub mod entry;
pub mod error;
pub mod server;
pub mod store;
pub mod table;

pub use blockfall_types as types;

pub use client::{HttpLeaderboard, InMemoryLeaderboard, LeaderboardClient};
pub use dispatch::{BackgroundLeaderboard, LeaderboardEvent};
pub use entry::{LeaderboardEntry, ScoreSubmission, SubmitOutcome, SubmitResponse, MAX_NAME_LEN};
pub use error::LeaderboardError;
pub use server::{router, serve, AppState, ServerConfig};
pub use store::JsonFileStore;
pub use table::ScoreTable;
