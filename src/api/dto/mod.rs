//! Data Transfer Objects for REST request/response serialization.
//!
//! Event, auth and admin payloads use camelCase field names to match the
//! dashboard. Detection payloads keep the table's snake_case layout.

pub mod admin_dto;
pub mod auth_dto;
pub mod detection_dto;
pub mod event_dto;

pub use admin_dto::*;
pub use auth_dto::*;
pub use detection_dto::*;
pub use event_dto::*;
