//! Per-connection subscription manager.
//!
//! Tracks which severities a WebSocket client follows and provides
//! server-side filtering of [`FeedEvent`]s.

use std::collections::HashSet;

use crate::domain::{FeedEvent, Severity};

/// Severity selector matching every label.
pub const WILDCARD: &str = "*";

/// Manages the severity subscriptions of a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Followed severities. Ignored while `subscribe_all` is set.
    severities: HashSet<Severity>,
    /// Whether the client follows everything (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds severities to the subscription set.
    pub fn subscribe(&mut self, severities: &[Severity], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.severities.extend(severities.iter().copied());
    }

    /// Removes severities from the subscription set. The wildcard clears
    /// everything.
    pub fn unsubscribe(&mut self, severities: &[Severity], wildcard: bool) {
        if wildcard {
            self.subscribe_all = false;
            self.severities.clear();
        }
        for severity in severities {
            self.severities.remove(severity);
        }
    }

    /// Returns `true` if `event` passes the filter.
    ///
    /// Notifications without a severity (reloads) reach wildcard
    /// subscribers only.
    #[must_use]
    pub fn matches(&self, event: &FeedEvent) -> bool {
        if self.subscribe_all {
            return true;
        }
        event
            .severity()
            .is_some_and(|severity| self.severities.contains(&severity))
    }

    /// Explicitly followed severities, in ascending order.
    #[must_use]
    pub fn severities(&self) -> Vec<Severity> {
        Severity::ALL
            .into_iter()
            .filter(|s| self.severities.contains(s))
            .collect()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::outburst_event::seed_events;

    fn added(severity: Severity) -> FeedEvent {
        let Some(mut event) = seed_events(Utc::now()).into_iter().next() else {
            panic!("seed is not empty");
        };
        event.severity = severity;
        FeedEvent::EventAdded {
            event,
            nearby_count: 0,
            timestamp: Utc::now(),
        }
    }

    fn reloaded() -> FeedEvent {
        FeedEvent::EventsReloaded {
            count: 3,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(&added(Severity::High)));
        assert!(!mgr.matches(&reloaded()));
    }

    #[test]
    fn subscribe_specific_severity() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[Severity::High], false);
        assert!(mgr.matches(&added(Severity::High)));
        assert!(!mgr.matches(&added(Severity::Low)));
        assert!(!mgr.matches(&reloaded()));
    }

    #[test]
    fn wildcard_matches_everything() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        for severity in Severity::ALL {
            assert!(mgr.matches(&added(severity)));
        }
        assert!(mgr.matches(&reloaded()));
    }

    #[test]
    fn unsubscribe_removes_severity() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[Severity::Medium, Severity::High], false);
        mgr.unsubscribe(&[Severity::Medium], false);
        assert!(!mgr.matches(&added(Severity::Medium)));
        assert_eq!(mgr.severities(), vec![Severity::High]);

        mgr.subscribe(&[], true);
        mgr.unsubscribe(&[], true);
        assert!(!mgr.is_subscribed_all());
        assert!(mgr.severities().is_empty());
    }
}
