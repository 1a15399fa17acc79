//! Admin upload flow: analyze an image, then put any outburst on the map.

use std::sync::Arc;

use chrono::Utc;

use super::analysis_service::{AnalysisResult, ImageAnalyzer};
use super::detection_service::DetectionService;
use super::event_service::{AddedEvent, EventService};
use crate::domain::{GeoPoint, NewOutburstEvent, Severity};
use crate::error::GlacierError;
use crate::persistence::models::NewDetection;

/// Detection label used for rows recorded by the admin flow.
pub const OUTBURST_DETECTION_TYPE: &str = "glacier_outburst";

/// What the admin submitted alongside the image.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    /// Map location the admin selected. Without it no event is created.
    pub selected_location: Option<GeoPoint>,
    /// Image reference stored on the created event.
    pub image_url: Option<String>,
}

/// Everything produced by one admin analysis.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Raw analyzer output.
    pub result: AnalysisResult,
    /// The event placed on the map, if any.
    pub added: Option<AddedEvent>,
    /// ID of the recorded detection row, if any.
    pub detection_id: Option<i64>,
}

/// Coordinates the analyzer, the event service and detection recording.
#[derive(Debug, Clone)]
pub struct AdminService {
    analyzer: Arc<ImageAnalyzer>,
    events: EventService,
    detections: DetectionService,
    record_detections: bool,
}

impl AdminService {
    /// Creates a new `AdminService`.
    #[must_use]
    pub fn new(
        analyzer: Arc<ImageAnalyzer>,
        events: EventService,
        detections: DetectionService,
        record_detections: bool,
    ) -> Self {
        Self {
            analyzer,
            events,
            detections,
            record_detections,
        }
    }

    /// Returns `true` while an analysis is running.
    #[must_use]
    pub fn is_analyzing(&self) -> bool {
        self.analyzer.is_analyzing()
    }

    /// Analyzes `image`. When the verdict is an outburst and the admin
    /// selected a location, the outburst becomes a map event and, if
    /// enabled, a detection row.
    ///
    /// # Errors
    ///
    /// Returns [`GlacierError::InvalidRequest`] for an empty image or an
    /// out-of-range selected location.
    pub async fn analyze(
        &self,
        image: &[u8],
        request: AnalysisRequest,
    ) -> Result<AnalysisReport, GlacierError> {
        if let Some(selected) = request.selected_location {
            selected.validate()?;
        }

        let result = self.analyzer.analyze(image).await?;

        let Some(selected) = request.selected_location.filter(|_| result.is_outburst) else {
            return Ok(AnalysisReport {
                result,
                added: None,
                detection_id: None,
            });
        };

        let location = result.location.unwrap_or(selected);
        let added = self
            .events
            .add_event(NewOutburstEvent {
                location,
                severity: Severity::from_confidence(result.confidence),
                detected_at: Utc::now(),
                description: describe(result.confidence),
                image_url: request.image_url,
            })
            .await?;

        let detection_id = if self.record_detections {
            self.record(&result, location).await
        } else {
            None
        };

        Ok(AnalysisReport {
            result,
            added: Some(added),
            detection_id,
        })
    }

    async fn record(&self, result: &AnalysisResult, location: GeoPoint) -> Option<i64> {
        let detection = NewDetection {
            detection_type: OUTBURST_DETECTION_TYPE.to_string(),
            confidence: result.confidence,
            coordinates: serde_json::json!([location.latitude, location.longitude]),
        };
        match self.detections.record(&detection).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(error = %e, "failed to record admin detection");
                None
            }
        }
    }
}

/// Event description for an admin-detected outburst.
#[must_use]
pub fn describe(confidence: f64) -> String {
    format!(
        "Glacier outburst detected by admin analysis with {}% confidence",
        (confidence * 100.0).round()
    )
}
