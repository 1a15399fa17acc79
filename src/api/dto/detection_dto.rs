//! Detection record DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::persistence::models::DetectionRecord;

/// Message returned when a detection was stored.
pub const DETECTION_SAVED_MESSAGE: &str = "Detection saved successfully";

/// Documented shape of `POST /api/detections`.
///
/// The handler reads the raw body, so this type only feeds the OpenAPI
/// document. Every field is optional.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateDetectionRequest {
    /// Detection label. Scalars are stringified.
    #[serde(rename = "type")]
    #[schema(example = "glacier_melt")]
    pub detection_type: Option<String>,
    /// Model confidence. Numeric strings are accepted.
    #[schema(example = 0.75)]
    pub confidence: Option<f64>,
    /// Arbitrary JSON, stored verbatim.
    #[schema(value_type = Object, example = json!([10, 20]))]
    pub coordinates: Option<serde_json::Value>,
}

/// Response body for `POST /api/detections` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateDetectionResponse {
    /// Always [`DETECTION_SAVED_MESSAGE`].
    pub message: String,
    /// Assigned row ID.
    pub id: i64,
}

impl CreateDetectionResponse {
    /// Builds the success body for row `id`.
    #[must_use]
    pub fn saved(id: i64) -> Self {
        Self {
            message: DETECTION_SAVED_MESSAGE.to_string(),
            id,
        }
    }
}

/// One row in `GET /api/detections`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DetectionDto {
    /// Row ID.
    pub id: i64,
    /// Insertion time.
    pub timestamp: DateTime<Utc>,
    /// Detection label.
    #[serde(rename = "type")]
    pub detection_type: String,
    /// Model confidence.
    pub confidence: f64,
    /// Decoded coordinates, `null` if the stored text is not JSON.
    #[schema(value_type = Object)]
    pub coordinates: serde_json::Value,
}

impl From<DetectionRecord> for DetectionDto {
    fn from(record: DetectionRecord) -> Self {
        let coordinates = record.coordinates_json();
        Self {
            id: record.id,
            timestamp: record.timestamp,
            detection_type: record.detection_type,
            confidence: record.confidence,
            coordinates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_uses_type_key_and_decoded_coordinates() {
        let record = DetectionRecord {
            id: 4,
            timestamp: Utc::now(),
            detection_type: "glacier_melt".to_string(),
            confidence: 0.75,
            coordinates: "[10,20]".to_string(),
        };
        let value = serde_json::to_value(DetectionDto::from(record)).unwrap_or_default();
        assert_eq!(value["type"], "glacier_melt");
        assert_eq!(value["coordinates"], json!([10, 20]));
        assert!(value.get("detection_type").is_none());
    }

    #[test]
    fn saved_message() {
        let body = serde_json::to_value(CreateDetectionResponse::saved(9)).unwrap_or_default();
        assert_eq!(body, json!({"message": "Detection saved successfully", "id": 9}));
    }
}
