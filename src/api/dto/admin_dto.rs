//! Admin analysis DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::event_dto::AddEventResponse;
use crate::domain::GeoPoint;
use crate::service::admin_service::{AnalysisReport, AnalysisRequest};
use crate::service::analysis_service::AnalysisResult;

/// Query parameters for `POST /api/admin/analyze`.
///
/// `latitude` and `longitude` are the map location the admin selected;
/// both must be present for an outburst to be placed on the map.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AnalyzeQuery {
    /// Selected latitude.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Selected longitude.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Image reference stored on the created event.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<AnalyzeQuery> for AnalysisRequest {
    fn from(query: AnalyzeQuery) -> Self {
        let selected_location = match (query.latitude, query.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
            _ => None,
        };
        Self {
            selected_location,
            image_url: query.image_url,
        }
    }
}

/// Response body for `POST /api/admin/analyze`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    /// Analyzer verdict.
    pub result: AnalysisResult,
    /// Event placed on the map, if any.
    pub event: Option<AddEventResponse>,
    /// Detection row recorded for the outburst, if any.
    pub detection_id: Option<i64>,
}

impl From<AnalysisReport> for AnalyzeResponse {
    fn from(report: AnalysisReport) -> Self {
        Self {
            result: report.result,
            event: report.added.map(AddEventResponse::from),
            detection_id: report.detection_id,
        }
    }
}

/// Response body for `GET /api/admin/status`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatusResponse {
    /// Whether an analysis is running.
    pub is_analyzing: bool,
}
