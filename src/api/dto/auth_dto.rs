//! Mocked authentication DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{GeoPoint, User};
use crate::service::auth_service::Signup;

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Password, at least 6 characters.
    pub password: String,
}

/// Request body for `POST /api/auth/signup`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Login email.
    pub email: String,
    /// Display name, at least 3 characters.
    pub username: String,
    /// Optional `+`, then 10 to 12 digits.
    pub phone_number: String,
    /// Password, at least 6 characters.
    pub password: String,
    /// Home location. Signup fails without it.
    #[serde(default)]
    pub location: Option<GeoPoint>,
}

impl From<SignupRequest> for Signup {
    fn from(req: SignupRequest) -> Self {
        Self {
            email: req.email,
            username: req.username,
            phone_number: req.phone_number,
            password: req.password,
            location: req.location,
        }
    }
}

/// Response body wrapping the signed-in user.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// The signed-in user.
    pub user: User,
}

/// Response body for `GET /api/auth/session`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Whether a session is active.
    pub is_authenticated: bool,
    /// The signed-in user, `null` without a session.
    pub user: Option<User>,
}

impl From<Option<User>> for SessionResponse {
    fn from(user: Option<User>) -> Self {
        Self {
            is_authenticated: user.is_some(),
            user,
        }
    }
}

/// Request body for `PUT /api/auth/location`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLocationRequest {
    /// New home location.
    pub location: GeoPoint,
}
