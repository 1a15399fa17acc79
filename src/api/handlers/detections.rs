//! Detection record handlers.
//!
//! `POST` reads the raw body so that any decoding failure produces the
//! fixed `Invalid input data` message rather than an extractor rejection.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{CreateDetectionRequest, CreateDetectionResponse, DetectionDto};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GlacierError};

/// `POST /api/detections` — Store a detection record.
///
/// # Errors
///
/// Returns [`GlacierError::InvalidInput`] for an unusable body and
/// [`GlacierError::PersistenceError`] on database failure.
#[utoipa::path(
    post,
    path = "/api/detections",
    tag = "Detections",
    summary = "Record a detection",
    description = "Accepts any non-empty JSON document. Missing fields default to an empty type, zero confidence and empty coordinates.",
    request_body = CreateDetectionRequest,
    responses(
        (status = 201, description = "Detection saved", body = CreateDetectionResponse),
        (status = 400, description = "Invalid input data", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse),
    )
)]
pub async fn create_detection(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, GlacierError> {
    let id = state.detection_service.create_from_body(&body).await?;
    Ok((StatusCode::CREATED, Json(CreateDetectionResponse::saved(id))))
}

/// `GET /api/detections` — The 100 newest detection records.
///
/// # Errors
///
/// Returns [`GlacierError::PersistenceError`] on database failure.
#[utoipa::path(
    get,
    path = "/api/detections",
    tag = "Detections",
    summary = "List detections",
    description = "Returns the 100 most recent records, newest first.",
    responses(
        (status = 200, description = "Detection list", body = Vec<DetectionDto>),
        (status = 500, description = "Database failure", body = ErrorResponse),
    )
)]
pub async fn list_detections(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GlacierError> {
    let rows = state.detection_service.latest().await?;
    let body: Vec<DetectionDto> = rows.into_iter().map(DetectionDto::from).collect();
    Ok(Json(body))
}

/// `OPTIONS /api/detections` — Plain 200 for clients that check the endpoint without
/// CORS preflight headers.
pub async fn detections_options() -> StatusCode {
    StatusCode::OK
}

/// Detection routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/detections",
        get(list_detections)
            .post(create_detection)
            .options(detections_options),
    )
}
