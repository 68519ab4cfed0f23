//! Leaderboard clients
//!
//! [`LeaderboardClient`] is the seam the game talks through. [`HttpLeaderboard`]
//! speaks the service's JSON wire format over hyper; [`InMemoryLeaderboard`]
//! applies the same table semantics locally, for tests and offline play.

use std::future::{self, Future};
use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{header, Method, Request};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::entry::{LeaderboardEntry, ScoreSubmission, SubmitResponse};
use crate::error::LeaderboardError;
use crate::table::ScoreTable;

/// Submit and fetch operations against some leaderboard
pub trait LeaderboardClient {
    /// Upsert-if-greater
    fn submit(
        &self,
        submission: ScoreSubmission,
    ) -> impl Future<Output = Result<SubmitResponse, LeaderboardError>> + Send;

    /// Up to `n` entries, highest score first
    fn fetch_top(
        &self,
        n: usize,
    ) -> impl Future<Output = Result<Vec<LeaderboardEntry>, LeaderboardError>> + Send;
}

/// Client for the HTTP leaderboard service
#[derive(Debug, Clone)]
pub struct HttpLeaderboard {
    base_url: String,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl HttpLeaderboard {
    /// `base_url` is the service root, e.g. `http://127.0.0.1:3000`
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: Client::builder(TokioExecutor::new()).build_http(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: Request<Full<Bytes>>,
    ) -> Result<T, LeaderboardError> {
        debug!(method = %request.method(), uri = %request.uri(), "leaderboard request");
        let response = self
            .client
            .request(request)
            .await
            .map_err(LeaderboardError::transport)?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(LeaderboardError::transport)?
            .to_bytes();

        if !status.is_success() {
            return Err(LeaderboardError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

impl LeaderboardClient for HttpLeaderboard {
    async fn submit(&self, submission: ScoreSubmission) -> Result<SubmitResponse, LeaderboardError> {
        let body = serde_json::to_vec(&submission)?;
        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("{}/submit-score", self.base_url))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))
            .map_err(LeaderboardError::transport)?;
        self.send(request).await
    }

    async fn fetch_top(&self, n: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(format!("{}/leaderboard?limit={n}", self.base_url))
            .body(Full::new(Bytes::new()))
            .map_err(LeaderboardError::transport)?;
        self.send(request).await
    }
}

/// Process-local leaderboard with the service's semantics
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeaderboard {
    table: Arc<Mutex<ScoreTable>>,
}

impl InMemoryLeaderboard {
    pub fn new(table: ScoreTable) -> Self {
        Self {
            table: Arc::new(Mutex::new(table)),
        }
    }

    /// Copy of the current table
    pub fn table(&self) -> ScoreTable {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LeaderboardClient for InMemoryLeaderboard {
    fn submit(
        &self,
        submission: ScoreSubmission,
    ) -> impl Future<Output = Result<SubmitResponse, LeaderboardError>> + Send {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        future::ready(Ok(table.submit(&submission)))
    }

    fn fetch_top(
        &self,
        n: usize,
    ) -> impl Future<Output = Result<Vec<LeaderboardEntry>, LeaderboardError>> + Send {
        let table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        future::ready(Ok(table.top(n)))
    }
}
