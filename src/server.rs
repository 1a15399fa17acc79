//! Application assembly: state construction and the router.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::GlacierConfig;
use crate::domain::{EventBus, EventStore};
use crate::error::GlacierError;
use crate::persistence::DetectionRepository;
use crate::persistence::local::LocalStore;
use crate::persistence::postgres::PostgresDetections;
use crate::service::{AdminService, AuthService, DetectionService, EventService, ImageAnalyzer};
use crate::ws::handler::ws_handler;

/// Builds every service from `config`.
///
/// Connects to PostgreSQL and runs migrations when persistence is
/// enabled, then restores the event list and session from the data
/// directory.
///
/// # Errors
///
/// Returns [`GlacierError::PersistenceError`] if the database cannot be
/// reached or migrated.
pub async fn build_state(config: &GlacierConfig) -> Result<AppState, GlacierError> {
    let repository = if config.persistence_enabled {
        DetectionRepository::Postgres(PostgresDetections::connect(config).await?)
    } else {
        tracing::info!("persistence disabled, detections kept in memory");
        DetectionRepository::in_memory()
    };

    let local = LocalStore::from_dir(config.data_dir.as_deref());
    let store = Arc::new(EventStore::load(local.clone()).await);
    let event_bus = EventBus::new(config.event_bus_capacity);

    let event_service = EventService::new(store, event_bus.clone(), config.nearby_radius_km);
    let detection_service = DetectionService::new(Arc::new(repository));
    let analyzer = Arc::new(ImageAnalyzer::new(
        config.analysis_delay,
        config.analysis_seed,
    ));
    let admin_service = AdminService::new(
        analyzer,
        event_service.clone(),
        detection_service.clone(),
        config.record_detections,
    );
    let auth_service = AuthService::restore(local).await;

    Ok(AppState {
        event_service: Arc::new(event_service),
        detection_service: Arc::new(detection_service),
        auth_service: Arc::new(auth_service),
        admin_service: Arc::new(admin_service),
        event_bus,
    })
}

/// Builds the HTTP application: REST routes, `/ws`, tracing and CORS.
pub fn build_app(state: AppState) -> Router {
    let router = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler));

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()),
        )
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
