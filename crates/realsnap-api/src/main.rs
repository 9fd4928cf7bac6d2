//! # realsnap — Binary Entry Point
//!
//! Starts the Axum HTTP server. Configuration comes from flags and
//! environment variables; see `realsnap --help`.

use anyhow::Context;
use clap::Parser;
use realsnap_api::{AppConfig, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::parse();

    // Initialize structured tracing.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let port = config.port;
    let data_dir = config.data_dir.clone();
    let state = AppState::open(config).map_err(|e| {
        tracing::error!(data_dir = %data_dir.display(), "failed to open stores: {e}");
        e
    })?;

    let app = realsnap_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("RealSnap listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
