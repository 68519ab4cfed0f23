//! Client configuration from the environment

use std::time::Duration;

use crate::types::TICK_MS;

/// Terminal client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Name scores are submitted under; no submission when unset
    pub player: Option<String>,
    pub leaderboard_url: String,
    pub tick: Duration,
    /// Piece sequence seed; drawn from OS entropy when unset
    pub seed: Option<u64>,
    /// File to write tracing output to
    pub log_path: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            player: None,
            leaderboard_url: "http://127.0.0.1:3000".to_string(),
            tick: Duration::from_millis(TICK_MS as u64),
            seed: None,
            log_path: None,
        }
    }
}

impl ClientConfig {
    /// Create from the process environment
    pub fn from_env() -> Self {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Create from an arbitrary variable lookup
    ///
    /// Blank values count as unset; unparsable numbers fall back to defaults.
    pub fn from_env_with<F>(mut get_env: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut var = |key: &str| {
            get_env(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let defaults = Self::default();

        let tick = var("BLOCKFALL_TICK_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.tick);

        Self {
            player: var("BLOCKFALL_PLAYER"),
            leaderboard_url: var("BLOCKFALL_LEADERBOARD_URL").unwrap_or(defaults.leaderboard_url),
            tick,
            seed: var("BLOCKFALL_SEED").and_then(|s| s.parse().ok()),
            log_path: var("BLOCKFALL_LOG_PATH"),
        }
    }
}
