//! Leaderboard records and the validated submission type

use serde::{Deserialize, Serialize};

use crate::error::LeaderboardError;

/// Longest accepted player name, in characters
pub const MAX_NAME_LEN: usize = 32;

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// A score ready to be submitted
///
/// The name is trimmed, non-empty, and at most [`MAX_NAME_LEN`] characters.
/// Deserializing goes through the same validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSubmission")]
pub struct ScoreSubmission {
    name: String,
    score: u32,
}

#[derive(Deserialize)]
struct RawSubmission {
    name: String,
    score: u32,
}

impl TryFrom<RawSubmission> for ScoreSubmission {
    type Error = LeaderboardError;

    fn try_from(raw: RawSubmission) -> Result<Self, Self::Error> {
        Self::new(&raw.name, raw.score)
    }
}

impl ScoreSubmission {
    pub fn new(name: &str, score: u32) -> Result<Self, LeaderboardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeaderboardError::InvalidName("name must not be empty"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(LeaderboardError::InvalidName("name is too long"));
        }
        if name.chars().any(char::is_control) {
            return Err(LeaderboardError::InvalidName("name contains control characters"));
        }
        Ok(Self {
            name: name.to_string(),
            score,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

/// What a submission did to the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitOutcome {
    /// First score for this name
    Inserted,
    /// Replaced a lower score
    Updated,
    /// The stored score was equal or higher
    Unchanged,
}

impl SubmitOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, SubmitOutcome::Unchanged)
    }
}

/// Result of a submission, with the score now stored for the name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub outcome: SubmitOutcome,
    pub score: u32,
}
