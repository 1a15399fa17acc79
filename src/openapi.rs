//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::handlers::{admin, auth, detections, events, system};

/// Generated OpenAPI description, served at `/api-docs/openapi.json`
/// when the `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "GlacierGuard API",
        description = "Glacier outburst events, detection records and the admin analysis flow."
    ),
    paths(
        system::health_handler,
        system::severities_handler,
        events::list_events,
        events::create_event,
        events::get_event,
        events::nearby_events,
        events::reload_events,
        detections::create_detection,
        detections::list_detections,
        auth::login,
        auth::signup,
        auth::logout,
        auth::session,
        auth::update_location,
        admin::analyze_image,
        admin::admin_status,
    ),
    tags(
        (name = "System", description = "Health and catalogs"),
        (name = "Events", description = "Outburst events on the map"),
        (name = "Detections", description = "Stored detection records"),
        (name = "Auth", description = "Mocked session"),
        (name = "Admin", description = "Image analysis"),
    )
)]
pub struct ApiDoc;
