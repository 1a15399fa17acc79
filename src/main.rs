//! glacier-guard server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use glacier_guard::config::{GlacierConfig, LogFormat};
use glacier_guard::server::{build_app, build_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GlacierConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(addr = %config.listen_addr, "starting glacier-guard");

    let state = build_state(&config)
        .await
        .context("failed to initialise services")?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
