//! Outburst event DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{GeoPoint, NewOutburstEvent, OutburstEvent, Severity};
use crate::service::event_service::{AddedEvent, NearbyEvent};

/// Request body for `POST /api/events`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// Where the outburst was observed.
    pub location: GeoPoint,
    /// Urgency label.
    pub severity: Severity,
    /// Detection time. Defaults to now.
    #[serde(default)]
    pub detected_at: Option<DateTime<Utc>>,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Optional image of the site.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CreateEventRequest {
    /// Converts the request into a store-ready event stamped at `now` when
    /// no detection time was given.
    #[must_use]
    pub fn into_new_event(self, now: DateTime<Utc>) -> NewOutburstEvent {
        NewOutburstEvent {
            location: self.location,
            severity: self.severity,
            detected_at: self.detected_at.unwrap_or(now),
            description: self.description,
            image_url: self.image_url,
        }
    }
}

/// An event paired with its distance from a reference point.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NearbyEventDto {
    /// The neighbouring event.
    pub event: OutburstEvent,
    /// Great-circle distance in kilometres.
    pub distance_km: f64,
}

impl From<NearbyEvent> for NearbyEventDto {
    fn from(nearby: NearbyEvent) -> Self {
        Self {
            event: nearby.event,
            distance_km: nearby.distance_km,
        }
    }
}

/// Response body for `POST /api/events` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct AddEventResponse {
    /// The stored event.
    pub event: OutburstEvent,
    /// Earlier events within the nearby radius.
    pub nearby: Vec<NearbyEventDto>,
}

impl From<AddedEvent> for AddEventResponse {
    fn from(added: AddedEvent) -> Self {
        Self {
            event: added.event,
            nearby: added.nearby.into_iter().map(NearbyEventDto::from).collect(),
        }
    }
}

/// Query parameters for `GET /api/events/nearby`.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NearbyQuery {
    /// Reference latitude.
    pub latitude: f64,
    /// Reference longitude.
    pub longitude: f64,
    /// Search radius. Defaults to the configured nearby radius.
    #[serde(default)]
    pub radius_km: Option<f64>,
}

impl NearbyQuery {
    /// Reference point of the query.
    #[must_use]
    pub const fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Response body for `POST /api/events/reload`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReloadResponse {
    /// Number of events after the reload.
    pub count: usize,
}
