//! In-process detection storage used when PostgreSQL is disabled.

use chrono::Utc;
use tokio::sync::RwLock;

use super::models::{DetectionRecord, NewDetection};

/// Detection rows kept in a vector, with IDs handed out sequentially
/// from 1.
#[derive(Debug, Default)]
pub struct MemoryDetections {
    rows: RwLock<Vec<DetectionRecord>>,
}

impl MemoryDetections {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row and returns its ID.
    pub async fn insert(&self, detection: &NewDetection) -> i64 {
        let mut rows = self.rows.write().await;
        let id = rows.last().map_or(1, |r| r.id.saturating_add(1));
        rows.push(DetectionRecord {
            id,
            timestamp: Utc::now(),
            detection_type: detection.detection_type.clone(),
            confidence: detection.confidence,
            coordinates: detection.coordinates_text(),
        });
        id
    }

    /// Returns the newest `limit` rows, newest first.
    pub async fn latest(&self, limit: i64) -> Vec<DetectionRecord> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        rows
    }
}
