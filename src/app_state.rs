//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::{AdminService, AuthService, DetectionService, EventService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Outburst events and proximity queries.
    pub event_service: Arc<EventService>,
    /// Detection records.
    pub detection_service: Arc<DetectionService>,
    /// The mocked session slot.
    pub auth_service: Arc<AuthService>,
    /// Image analysis and admin event submission.
    pub admin_service: Arc<AdminService>,
    /// Live-feed bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}
