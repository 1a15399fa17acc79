//! Dashboard user profile and its identifier.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::GeoPoint;

/// Unique identifier for a user.
///
/// Wraps a UUID v4 generated when the session is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(uuid::Uuid);

impl UserId {
    /// Creates a new random `UserId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signed-in dashboard user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Session-scoped identifier.
    #[schema(value_type = uuid::Uuid)]
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub username: String,
    /// Contact number for alerts.
    pub phone_number: String,
    /// Home location used to centre the map.
    pub location: GeoPoint,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
}
