//! REST endpoint handlers organized by resource.

pub mod admin;
pub mod auth;
pub mod detections;
pub mod events;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(events::routes())
        .merge(detections::routes())
        .merge(auth::routes())
        .merge(admin::routes())
}
