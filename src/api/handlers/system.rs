//! System endpoints: health check and the severity catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::Severity;
use crate::domain::severity::{HIGH_CONFIDENCE, MEDIUM_CONFIDENCE};

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// One entry of the severity catalog.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeverityInfo {
    severity: Severity,
    /// Analyzer confidence must exceed this to earn the label.
    min_confidence_exclusive: Option<f64>,
    description: &'static str,
}

/// `GET /config/severities` — Severity labels and their thresholds.
#[utoipa::path(
    get,
    path = "/config/severities",
    tag = "System",
    summary = "List severity levels",
    description = "Returns every severity label with the analyzer confidence it is derived from.",
    responses(
        (status = 200, description = "Severity catalog", body = Vec<SeverityInfo>),
    )
)]
pub async fn severities_handler() -> impl IntoResponse {
    let catalog: Vec<SeverityInfo> = Severity::ALL
        .into_iter()
        .map(|severity| {
            let (min_confidence_exclusive, description) = match severity {
                Severity::Low => (None, "Monitor the site"),
                Severity::Medium => (Some(MEDIUM_CONFIDENCE), "Prepare downstream communities"),
                Severity::High => (Some(HIGH_CONFIDENCE), "Evacuate downstream communities"),
            };
            SeverityInfo {
                severity,
                min_confidence_exclusive,
                description,
            }
        })
        .collect();
    (StatusCode::OK, Json(catalog))
}

/// System routes mounted at the root level (not under /api).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/severities", get(severities_handler))
}
