//! Outburst events shown on the dashboard map.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::proximity::Located;
use super::{EventId, GeoPoint, Severity};

/// A detected (or simulated) glacier outburst.
///
/// Immutable once created. Field names follow the dashboard's camelCase
/// JSON so the `outburstEvents` snapshot is interchangeable with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutburstEvent {
    /// Store-unique identifier.
    #[schema(value_type = String, example = "1")]
    pub id: EventId,
    /// Where the outburst was observed.
    pub location: GeoPoint,
    /// Urgency label.
    pub severity: Severity,
    /// Detection timestamp.
    pub detected_at: DateTime<Utc>,
    /// Free-text description.
    pub description: String,
    /// Optional image of the site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Everything an event needs except its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOutburstEvent {
    /// Where the outburst was observed.
    pub location: GeoPoint,
    /// Urgency label.
    pub severity: Severity,
    /// Detection timestamp.
    pub detected_at: DateTime<Utc>,
    /// Free-text description.
    pub description: String,
    /// Optional image of the site.
    pub image_url: Option<String>,
}

impl NewOutburstEvent {
    /// Attaches an identifier, producing the stored event.
    #[must_use]
    pub fn with_id(self, id: EventId) -> OutburstEvent {
        OutburstEvent {
            id,
            location: self.location,
            severity: self.severity,
            detected_at: self.detected_at,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

impl Located for OutburstEvent {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

/// The three events the map starts with when nothing has been stored yet.
///
/// Timestamps are relative to `now`: today, yesterday, two days ago.
#[must_use]
pub fn seed_events(now: DateTime<Utc>) -> Vec<OutburstEvent> {
    vec![
        OutburstEvent {
            id: EventId::new(1),
            location: GeoPoint::new(34.1526, 77.5771),
            severity: Severity::High,
            detected_at: now,
            description: "Major outburst detected in Ladakh region".to_string(),
            image_url: Some(
                "https://images.pexels.com/photos/15013802/pexels-photo-15013802.jpeg".to_string(),
            ),
        },
        OutburstEvent {
            id: EventId::new(2),
            location: GeoPoint::new(32.2432, 77.1892),
            severity: Severity::Medium,
            detected_at: now - Duration::days(1),
            description: "Moderate glacier melt in Himachal Pradesh".to_string(),
            image_url: Some(
                "https://images.pexels.com/photos/2086621/pexels-photo-2086621.jpeg".to_string(),
            ),
        },
        OutburstEvent {
            id: EventId::new(3),
            location: GeoPoint::new(30.0869, 79.3199),
            severity: Severity::Low,
            detected_at: now - Duration::days(2),
            description: "Minor outburst activity detected in Uttarakhand".to_string(),
            image_url: Some(
                "https://images.pexels.com/photos/3380448/pexels-photo-3380448.jpeg".to_string(),
            ),
        },
    ]
}
