//! Service layer: business logic orchestration.
//!
//! [`EventService`] owns the outburst event flow and publishes to the
//! [`super::domain::EventBus`]; the remaining services cover detections,
//! the mocked session and the admin analysis flow.

pub mod admin_service;
pub mod analysis_service;
pub mod auth_service;
pub mod detection_service;
pub mod event_service;

pub use admin_service::AdminService;
pub use analysis_service::ImageAnalyzer;
pub use auth_service::AuthService;
pub use detection_service::DetectionService;
pub use event_service::EventService;
