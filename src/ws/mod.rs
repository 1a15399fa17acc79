//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The endpoint at `/ws` pushes outburst notifications to map clients
//! that subscribed to the matching severities.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
