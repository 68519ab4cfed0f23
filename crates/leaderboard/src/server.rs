//! HTTP leaderboard service
//!
//! `GET /leaderboard?limit=N`, `POST /submit-score`, and `GET /health`, with
//! permissive CORS so a browser page on any origin can call it.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::entry::{LeaderboardEntry, ScoreSubmission, SubmitResponse};
use crate::error::LeaderboardError;
use crate::store::JsonFileStore;
use crate::table::ScoreTable;
use crate::types::{LEADERBOARD_MAX_N, LEADERBOARD_TOP_N};

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// JSON store location
    pub db_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            db_path: PathBuf::from("leaderboard.json"),
        }
    }
}

impl ServerConfig {
    /// Create from the process environment
    pub fn from_env() -> Self {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Create from an arbitrary variable lookup
    ///
    /// `BLOCKFALL_LEADERBOARD_ADDR` wins over `BLOCKFALL_LEADERBOARD_PORT`
    /// (bound on 127.0.0.1). Unparsable values fall through to the next
    /// option.
    pub fn from_env_with<F>(mut get_env: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let addr = get_env("BLOCKFALL_LEADERBOARD_ADDR")
            .and_then(|v| v.trim().parse().ok())
            .or_else(|| {
                get_env("BLOCKFALL_LEADERBOARD_PORT")
                    .and_then(|v| v.trim().parse::<u16>().ok())
                    .map(|port| SocketAddr::from(([127, 0, 0, 1], port)))
            })
            .unwrap_or(defaults.addr);

        let db_path = get_env("BLOCKFALL_LEADERBOARD_DB")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        Self { addr, db_path }
    }
}

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    table: Arc<Mutex<ScoreTable>>,
    store: Option<Arc<JsonFileStore>>,
}

impl AppState {
    /// Unpersisted table, for tests and throwaway servers
    pub fn in_memory(table: ScoreTable) -> Self {
        Self {
            table: Arc::new(Mutex::new(table)),
            store: None,
        }
    }

    /// Load `store` and persist every change back to it
    pub fn persistent(store: JsonFileStore) -> Result<Self, LeaderboardError> {
        let table = store.load()?;
        info!(path = %store.path().display(), entries = table.len(), "leaderboard loaded");
        Ok(Self {
            table: Arc::new(Mutex::new(table)),
            store: Some(Arc::new(store)),
        })
    }

    /// Copy of the current table
    pub fn table(&self) -> ScoreTable {
        self.lock().clone()
    }

    // Poisoning is ignored: the table is only ever replaced wholesale.
    fn lock(&self) -> MutexGuard<'_, ScoreTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a submission, persisting before the change becomes visible
    pub fn submit(&self, submission: &ScoreSubmission) -> Result<SubmitResponse, LeaderboardError> {
        let mut table = self.lock();
        let mut next = table.clone();
        let response = next.submit(submission);

        if response.outcome.changed() {
            if let Some(store) = &self.store {
                store.save(&next)?;
            }
            *table = next;
        }
        Ok(response)
    }

    pub fn top(&self, n: usize) -> Vec<LeaderboardEntry> {
        self.lock().top(n)
    }
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/leaderboard", get(leaderboard))
        .route("/submit-score", post(submit_score))
        .with_state(state)
        .layer(cors)
}

/// Serve `state` on `listener` until the future is dropped or `shutdown` fires
pub async fn serve(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "leaderboard listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
struct TopQuery {
    limit: Option<usize>,
}

async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> Json<Vec<LeaderboardEntry>> {
    let limit = query
        .limit
        .unwrap_or(LEADERBOARD_TOP_N)
        .min(LEADERBOARD_MAX_N);
    Json(state.top(limit))
}

async fn submit_score(
    State(state): State<AppState>,
    payload: Result<Json<ScoreSubmission>, JsonRejection>,
) -> Result<Json<SubmitResponse>, (StatusCode, String)> {
    let Json(submission) = payload.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "rejected submission");
        (StatusCode::BAD_REQUEST, rejection.body_text())
    })?;

    match state.submit(&submission) {
        Ok(response) => {
            info!(
                name = submission.name(),
                score = submission.score(),
                outcome = ?response.outcome,
                "score submitted"
            );
            Ok(Json(response))
        }
        Err(err) => {
            error!(%err, "failed to persist score");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to save score".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_port_3000() {
        let config = ServerConfig::from_env_with(|_| None);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
    }

    #[test]
    fn config_prefers_explicit_addr() {
        let config = ServerConfig::from_env_with(|k| match k {
            "BLOCKFALL_LEADERBOARD_ADDR" => Some("0.0.0.0:8080".to_string()),
            "BLOCKFALL_LEADERBOARD_PORT" => Some("9000".to_string()),
            _ => None,
        });
        assert_eq!(config.addr, "0.0.0.0:8080".parse().unwrap());
    }

    #[test]
    fn config_ignores_invalid_addr_but_uses_valid_port() {
        let config = ServerConfig::from_env_with(|k| match k {
            "BLOCKFALL_LEADERBOARD_ADDR" => Some("not-an-addr".to_string()),
            "BLOCKFALL_LEADERBOARD_PORT" => Some("4557".to_string()),
            "BLOCKFALL_LEADERBOARD_DB" => Some("/tmp/scores.json".to_string()),
            _ => None,
        });
        assert_eq!(config.addr, SocketAddr::from(([127, 0, 0, 1], 4557)));
        assert_eq!(config.db_path, PathBuf::from("/tmp/scores.json"));
    }

    #[test]
    fn failed_persist_leaves_table_unchanged() {
        let dir = std::env::temp_dir().join(format!("blockfall-missing-{}", std::process::id()));
        let state = AppState {
            table: Arc::new(Mutex::new(ScoreTable::new())),
            store: Some(Arc::new(JsonFileStore::new(dir.join("scores.json")))),
        };
        let sub = ScoreSubmission::new("Ada", 50).unwrap();
        assert!(matches!(state.submit(&sub), Err(LeaderboardError::Storage(_))));
        assert!(state.table().is_empty());
    }
}
