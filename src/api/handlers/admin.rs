//! Admin analysis handlers.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{AdminStatusResponse, AnalyzeQuery, AnalyzeResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GlacierError};

/// Largest accepted upload.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// `POST /api/admin/analyze` — Analyze an uploaded image.
///
/// The body is the raw image. When the verdict is an outburst and both
/// coordinates were given, the outburst is added to the map.
///
/// # Errors
///
/// Returns [`GlacierError::InvalidRequest`] for an empty body, a
/// non-image content type or an invalid location, and
/// [`GlacierError::PayloadTooLarge`] above [`MAX_IMAGE_BYTES`].
#[utoipa::path(
    post,
    path = "/api/admin/analyze",
    tag = "Admin",
    summary = "Analyze an image",
    description = "Runs the stand-in detector on the uploaded image. Outbursts with a selected location become map events and detection records.",
    params(AnalyzeQuery),
    request_body(content = Vec<u8>, content_type = "image/*", description = "Raw image bytes"),
    responses(
        (status = 200, description = "Analysis finished", body = AnalyzeResponse),
        (status = 400, description = "Missing or invalid image", body = ErrorResponse),
        (status = 413, description = "Image too large", body = ErrorResponse),
    )
)]
pub async fn analyze_image(
    State(state): State<AppState>,
    query: Result<Query<AnalyzeQuery>, QueryRejection>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, GlacierError> {
    let Query(query) = query?;
    check_content_type(&headers)?;
    let image = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            GlacierError::PayloadTooLarge(MAX_IMAGE_BYTES)
        } else {
            GlacierError::InvalidRequest(rejection.body_text())
        }
    })?;

    let report = state.admin_service.analyze(&image, query.into()).await?;
    Ok(Json(AnalyzeResponse::from(report)))
}

/// `GET /api/admin/status` — Whether an analysis is running.
#[utoipa::path(
    get,
    path = "/api/admin/status",
    tag = "Admin",
    summary = "Analyzer status",
    responses(
        (status = 200, description = "Analyzer status", body = AdminStatusResponse),
    )
)]
pub async fn admin_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(AdminStatusResponse {
        is_analyzing: state.admin_service.is_analyzing(),
    })
}

fn check_content_type(headers: &HeaderMap) -> Result<(), GlacierError> {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return Ok(());
    };
    let content_type = value.to_str().unwrap_or_default();
    if content_type.trim().to_ascii_lowercase().starts_with("image/") {
        Ok(())
    } else {
        Err(GlacierError::InvalidRequest(
            "please upload an image file".to_string(),
        ))
    }
}

/// Admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/analyze",
            post(analyze_image).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES)),
        )
        .route("/admin/status", get(admin_status))
}
