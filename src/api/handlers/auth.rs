//! Mocked session handlers.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::api::dto::{
    LoginRequest, SessionResponse, SignupRequest, UpdateLocationRequest, UserResponse,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GlacierError};

/// `POST /api/auth/login` — Start a mock session.
///
/// # Errors
///
/// Returns [`GlacierError::InvalidRequest`] for a malformed email or a
/// short password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    summary = "Log in",
    description = "Any well-formed credentials succeed and produce the demo user.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = UserResponse),
        (status = 400, description = "Invalid credentials format", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GlacierError> {
    let Json(req) = payload?;
    let user = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(UserResponse { user }))
}

/// `POST /api/auth/signup` — Register and start a session.
///
/// # Errors
///
/// Returns [`GlacierError::InvalidRequest`] when a field fails validation.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "Auth",
    summary = "Sign up",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Signed up", body = UserResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GlacierError> {
    let Json(req) = payload?;
    let user = state.auth_service.signup(req.into()).await?;
    Ok(Json(UserResponse { user }))
}

/// `POST /api/auth/logout` — End the session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    summary = "Log out",
    responses(
        (status = 204, description = "Logged out"),
    )
)]
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    state.auth_service.logout().await;
    StatusCode::NO_CONTENT
}

/// `GET /api/auth/session` — Current session.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = "Auth",
    summary = "Current session",
    responses(
        (status = 200, description = "Session state", body = SessionResponse),
    )
)]
pub async fn session(State(state): State<AppState>) -> impl IntoResponse {
    Json(SessionResponse::from(state.auth_service.current_user().await))
}

/// `PUT /api/auth/location` — Move the signed-in user's home location.
///
/// # Errors
///
/// Returns [`GlacierError::NotAuthenticated`] without a session.
#[utoipa::path(
    put,
    path = "/api/auth/location",
    tag = "Auth",
    summary = "Update home location",
    request_body = UpdateLocationRequest,
    responses(
        (status = 200, description = "Location updated", body = UserResponse),
        (status = 400, description = "Invalid location", body = ErrorResponse),
        (status = 401, description = "No active session", body = ErrorResponse),
    )
)]
pub async fn update_location(
    State(state): State<AppState>,
    payload: Result<Json<UpdateLocationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GlacierError> {
    let Json(req) = payload?;
    let user = state.auth_service.update_location(req.location).await?;
    Ok(Json(UserResponse { user }))
}

/// Auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(session))
        .route("/auth/location", put(update_location))
}
