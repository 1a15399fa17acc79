//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use glacier_guard::config::GlacierConfig;
use glacier_guard::server::{build_app, build_state};

/// In-memory configuration with a fast, deterministic analyzer.
pub fn test_config() -> GlacierConfig {
    GlacierConfig {
        analysis_delay: Duration::ZERO,
        analysis_seed: Some(7),
        ..GlacierConfig::default()
    }
}

/// Starts the application on an ephemeral port and returns its address.
#[allow(clippy::panic)]
pub async fn spawn_app(config: GlacierConfig) -> SocketAddr {
    let Ok(state) = build_state(&config).await else {
        panic!("state should build without a database");
    };
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, build_app(state)).await;
    });
    addr
}
