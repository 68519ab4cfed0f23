//! Leaderboard HTTP service.
//!
//! Configured from `BLOCKFALL_LEADERBOARD_ADDR` / `BLOCKFALL_LEADERBOARD_PORT`
//! and `BLOCKFALL_LEADERBOARD_DB`; logs to stderr, filtered by `RUST_LOG`.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use blockfall::leaderboard::{serve, AppState, JsonFileStore, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::from_env();
    let state = AppState::persistent(JsonFileStore::new(&config.db_path))
        .with_context(|| format!("load {}", config.db_path.display()))?;

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("bind {}", config.addr))?;

    serve(listener, state, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutting down");
    })
    .await?;
    Ok(())
}
