//! # glacier-guard
//!
//! REST API and live feed backend for the GlacierGuard glacier outburst
//! dashboard.
//!
//! The service keeps the outburst events shown on the map, reports events
//! that lie close to each new one, stores detection records in a single
//! PostgreSQL table, and runs a stand-in image analyzer for the admin
//! upload flow. Authentication is mocked.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── EventService, AuthService, AdminService, DetectionService (service/)
//!     ├── EventStore, EventBus, proximity (domain/)
//!     │
//!     ├── LocalStore (`user`, `outburstEvents` documents)
//!     └── PostgreSQL `detections` table
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod openapi;
pub mod persistence;
pub mod server;
pub mod service;
pub mod ws;
