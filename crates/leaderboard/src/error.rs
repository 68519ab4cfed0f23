//! Leaderboard error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// Rejected before any request is made
    #[error("invalid player name: {0}")]
    InvalidName(&'static str),

    /// The service could not be reached, or the request could not be built
    #[error("leaderboard unreachable: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("leaderboard returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed leaderboard data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("leaderboard store failed: {0}")]
    Storage(#[from] std::io::Error),
}

impl LeaderboardError {
    pub(crate) fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }
}
