//! Live-feed notifications pushed to map clients.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{OutburstEvent, Severity};

/// Notification broadcast through the [`super::EventBus`] whenever the
/// event list changes.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum FeedEvent {
    /// A new outburst event was stored.
    EventAdded {
        /// The stored event.
        event: OutburstEvent,
        /// How many earlier events lie within the nearby radius.
        nearby_count: usize,
        /// When the event was stored.
        timestamp: DateTime<Utc>,
    },

    /// The event list was replaced from local persistence.
    EventsReloaded {
        /// Number of events after the reload.
        count: usize,
        /// When the reload happened.
        timestamp: DateTime<Utc>,
    },
}

impl FeedEvent {
    /// Severity of the event this notification is about, if any.
    #[must_use]
    pub fn severity(&self) -> Option<Severity> {
        match self {
            Self::EventAdded { event, .. } => Some(event.severity),
            Self::EventsReloaded { .. } => None,
        }
    }

    /// Returns the notification type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::EventAdded { .. } => "event_added",
            Self::EventsReloaded { .. } => "events_reloaded",
        }
    }
}
