//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof and hosts the pieces that
//! tie them together: client configuration and the game session.

pub mod config;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_leaderboard as leaderboard;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::ClientConfig;
pub use session::GameSession;
