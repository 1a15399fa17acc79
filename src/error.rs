//! Service error types with HTTP status code mapping.
//!
//! [`GlacierError`] is the central error type. Each variant maps to an HTTP
//! status code and every error response uses the same flat JSON body:
//!
//! ```json
//! { "error": "Invalid input data" }
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::EventId;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant             | HTTP Status |
/// |---------------------|-------------|
/// | `InvalidInput`      | 400         |
/// | `InvalidRequest`    | 400         |
/// | `PayloadTooLarge`   | 413         |
/// | `NotAuthenticated`  | 401         |
/// | `EventNotFound`     | 404         |
/// | `PersistenceError`  | 500         |
/// | `Storage`           | 500         |
/// | `Internal`          | 500         |
#[derive(Debug, thiserror::Error)]
pub enum GlacierError {
    /// Request body could not be decoded into a usable payload.
    #[error("Invalid input data")]
    InvalidInput,

    /// Request was decoded but failed a validation rule.
    #[error("{0}")]
    InvalidRequest(String),

    /// Upload exceeded the byte limit.
    #[error("image exceeds {0} bytes")]
    PayloadTooLarge(usize),

    /// Operation requires a logged-in session.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Outburst event with the given ID was not found.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// Database failure. The message carries the operation context.
    #[error("{0}")]
    PersistenceError(String),

    /// Local persistence (snapshot files) failure.
    #[error("local storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GlacierError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::EventNotFound(_) => StatusCode::NOT_FOUND,
            Self::PersistenceError(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for GlacierError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for GlacierError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for GlacierError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for GlacierError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message_is_fixed() {
        assert_eq!(GlacierError::InvalidInput.to_string(), "Invalid input data");
        assert_eq!(
            GlacierError::InvalidInput.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn persistence_error_keeps_context() {
        let err = GlacierError::PersistenceError("Error saving detection: boom".to_string());
        assert_eq!(err.to_string(), "Error saving detection: boom");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_and_unauthenticated_statuses() {
        assert_eq!(
            GlacierError::EventNotFound(EventId::new(7)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GlacierError::NotAuthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn into_response_sets_status() {
        let response = GlacierError::InvalidRequest("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
