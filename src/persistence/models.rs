//! Database models for detection records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of rows returned by a listing.
pub const DETECTION_LIST_LIMIT: i64 = 100;

/// A stored row from the `detections` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// Auto-increment row ID.
    pub id: i64,
    /// Server-side insertion timestamp.
    pub timestamp: DateTime<Utc>,
    /// Free-form detection label (e.g. `"glacier_melt"`).
    pub detection_type: String,
    /// Model confidence. Not range-checked.
    pub confidence: f64,
    /// JSON-encoded coordinates exactly as they were submitted.
    pub coordinates: String,
}

impl DetectionRecord {
    /// Decodes the stored coordinates, yielding `null` for text that is not
    /// valid JSON.
    #[must_use]
    pub fn coordinates_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.coordinates).unwrap_or(serde_json::Value::Null)
    }
}

/// Values for a row about to be inserted. The ID and timestamp are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDetection {
    /// Detection label.
    pub detection_type: String,
    /// Model confidence.
    pub confidence: f64,
    /// Coordinates as submitted.
    pub coordinates: serde_json::Value,
}

impl NewDetection {
    /// Serializes the coordinates for storage.
    #[must_use]
    pub fn coordinates_text(&self) -> String {
        self.coordinates.to_string()
    }
}
