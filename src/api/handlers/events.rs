//! Outburst event handlers: list, add, lookup, proximity, reload.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{
    AddEventResponse, CreateEventRequest, NearbyEventDto, NearbyQuery, ReloadResponse,
};
use crate::app_state::AppState;
use crate::domain::{EventId, OutburstEvent};
use crate::error::{ErrorResponse, GlacierError};

/// `GET /api/events` — Every event on the map.
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    summary = "List outburst events",
    description = "Returns every stored outburst event in insertion order.",
    responses(
        (status = 200, description = "Event list", body = Vec<OutburstEvent>),
    )
)]
pub async fn list_events(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.event_service.list_events().await)
}

/// `POST /api/events` — Add an outburst event.
///
/// # Errors
///
/// Returns [`GlacierError::InvalidRequest`] for a malformed body or an
/// out-of-range location.
#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    summary = "Add an outburst event",
    description = "Stores a new event, reports earlier events within the nearby radius, and pushes an `event_added` notification to live-feed subscribers.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event stored", body = AddEventResponse),
        (status = 400, description = "Invalid event", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GlacierError> {
    let Json(req) = payload?;
    let added = state
        .event_service
        .add_event(req.into_new_event(Utc::now()))
        .await?;
    Ok((StatusCode::CREATED, Json(AddEventResponse::from(added))))
}

/// `GET /api/events/{id}` — One event.
///
/// # Errors
///
/// Returns [`GlacierError::EventNotFound`] if no event has this ID.
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = "Events",
    summary = "Get an outburst event",
    params(
        ("id" = String, Path, description = "Event ID", example = "1"),
    ),
    responses(
        (status = 200, description = "Event details", body = OutburstEvent),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, GlacierError> {
    let Path(raw) = id?;
    let id: EventId = raw
        .parse()
        .map_err(|_| GlacierError::InvalidRequest(format!("invalid event id: {raw}")))?;
    Ok(Json(state.event_service.get_event(id).await?))
}

/// `GET /api/events/nearby` — Events around a point, closest first.
///
/// # Errors
///
/// Returns [`GlacierError::InvalidRequest`] for missing or out-of-range
/// parameters.
#[utoipa::path(
    get,
    path = "/api/events/nearby",
    tag = "Events",
    summary = "Find nearby events",
    description = "Returns events within `radiusKm` (default: the configured nearby radius) of the given point, sorted by great-circle distance.",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Nearby events", body = Vec<NearbyEventDto>),
        (status = 400, description = "Invalid query", body = ErrorResponse),
    )
)]
pub async fn nearby_events(
    State(state): State<AppState>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> Result<impl IntoResponse, GlacierError> {
    let Query(query) = query?;
    let radius = query
        .radius_km
        .unwrap_or_else(|| state.event_service.nearby_radius_km());
    let nearby = state.event_service.nearby(query.point(), radius).await?;
    let body: Vec<NearbyEventDto> = nearby.into_iter().map(NearbyEventDto::from).collect();
    Ok(Json(body))
}

/// `POST /api/events/reload` — Re-read the local snapshot.
#[utoipa::path(
    post,
    path = "/api/events/reload",
    tag = "Events",
    summary = "Reload events",
    description = "Replaces the in-memory list with the locally persisted snapshot, falling back to the seed events.",
    responses(
        (status = 200, description = "Reloaded", body = ReloadResponse),
    )
)]
pub async fn reload_events(State(state): State<AppState>) -> impl IntoResponse {
    let count = state.event_service.reload().await;
    Json(ReloadResponse { count })
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/nearby", get(nearby_events))
        .route("/events/reload", post(reload_events))
        .route("/events/{id}", get(get_event))
}
