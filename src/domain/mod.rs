//! Domain layer: map geometry, outburst events, users, and the live feed.
//!
//! Holds the event model with its store, the haversine proximity filter,
//! the mocked user profile, and the broadcast bus that feeds WebSocket
//! clients.

pub mod event_bus;
pub mod event_id;
pub mod event_store;
pub mod feed_event;
pub mod geo;
pub mod outburst_event;
pub mod proximity;
pub mod severity;
pub mod user;

pub use event_bus::EventBus;
pub use event_id::EventId;
pub use event_store::EventStore;
pub use feed_event::FeedEvent;
pub use geo::GeoPoint;
pub use outburst_event::{NewOutburstEvent, OutburstEvent};
pub use severity::Severity;
pub use user::{User, UserId};
