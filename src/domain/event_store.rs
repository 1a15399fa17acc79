//! In-memory outburst event list with a local snapshot.
//!
//! [`EventStore`] keeps every event behind a single
//! [`tokio::sync::RwLock`]. Reads run concurrently; appends are
//! serialized and write the whole list to the `outburstEvents` document
//! while still holding the lock, so snapshots land in append order.

use std::collections::HashSet;

use chrono::Utc;
use tokio::sync::RwLock;

use super::EventId;
use super::outburst_event::{NewOutburstEvent, OutburstEvent, seed_events};
use super::proximity::within_radius;
use crate::error::GlacierError;
use crate::persistence::local::{EVENTS_KEY, LocalStore};

/// Append-only store of outburst events.
#[derive(Debug)]
pub struct EventStore {
    events: RwLock<Vec<OutburstEvent>>,
    local: LocalStore,
}

impl EventStore {
    /// Creates a store holding only the seed events.
    #[must_use]
    pub fn seeded(local: LocalStore) -> Self {
        Self {
            events: RwLock::new(seed_events(Utc::now())),
            local,
        }
    }

    /// Creates a store from the stored snapshot, falling back to the seed
    /// when there is none or it cannot be read.
    pub async fn load(local: LocalStore) -> Self {
        let events = read_snapshot(&local).await;
        Self {
            events: RwLock::new(events),
            local,
        }
    }

    /// Replaces the in-memory list with the stored snapshot (or the seed).
    ///
    /// Returns the number of events after reloading.
    pub async fn reload(&self) -> usize {
        let events = read_snapshot(&self.local).await;
        let mut guard = self.events.write().await;
        *guard = events;
        guard.len()
    }

    /// Returns a copy of every event in insertion order.
    pub async fn list(&self) -> Vec<OutburstEvent> {
        self.events.read().await.clone()
    }

    /// Looks up a single event.
    ///
    /// # Errors
    ///
    /// Returns [`GlacierError::EventNotFound`] if no event has that ID.
    pub async fn get(&self, id: EventId) -> Result<OutburstEvent, GlacierError> {
        self.events
            .read()
            .await
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(GlacierError::EventNotFound(id))
    }

    /// Appends a new event, assigning the next free ID.
    ///
    /// A failed snapshot write is logged; the event is still kept in
    /// memory.
    pub async fn append(&self, new_event: NewOutburstEvent) -> OutburstEvent {
        let (event, _) = self.append_with_nearby(new_event, None).await;
        event
    }

    /// Appends a new event and returns, together with it, the events that
    /// were already stored within `radius_km` of it, paired with their
    /// distance.
    ///
    /// The neighbours are taken under the same write lock as the append,
    /// so concurrent appends always see each other. `None` skips the
    /// search.
    pub async fn append_with_nearby(
        &self,
        new_event: NewOutburstEvent,
        radius_km: Option<f64>,
    ) -> (OutburstEvent, Vec<(OutburstEvent, f64)>) {
        let mut events = self.events.write().await;

        let nearby = radius_km.map_or_else(Vec::new, |radius_km| {
            within_radius(new_event.location, &events, radius_km)
                .into_iter()
                .map(|hit| (hit.item.clone(), hit.distance_km))
                .collect()
        });

        let id = next_free_id(&events);
        let event = new_event.with_id(id);
        events.push(event.clone());

        if let Err(e) = self.local.set(EVENTS_KEY, &*events).await {
            tracing::warn!(error = %e, event_id = %id, "failed to persist event snapshot");
        }
        (event, nearby)
    }

    /// Returns the number of events.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Returns `true` if the store holds no events.
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

/// `max + 1`, or the lowest unused ID once `max` is `u64::MAX`.
fn next_free_id(events: &[OutburstEvent]) -> EventId {
    let Some(max) = events.iter().map(|e| e.id).max() else {
        return EventId::new(1);
    };
    if let Some(next) = max.checked_next() {
        return next;
    }
    let taken: HashSet<EventId> = events.iter().map(|e| e.id).collect();
    (1..=u64::MAX)
        .map(EventId::new)
        .find(|id| !taken.contains(id))
        .unwrap_or(max)
}

async fn read_snapshot(local: &LocalStore) -> Vec<OutburstEvent> {
    match local.get::<Vec<OutburstEvent>>(EVENTS_KEY).await {
        Ok(Some(events)) => {
            tracing::debug!(count = events.len(), "loaded event snapshot");
            events
        }
        Ok(None) => seed_events(Utc::now()),
        Err(e) => {
            tracing::warn!(error = %e, "unreadable event snapshot, using seed events");
            seed_events(Utc::now())
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{GeoPoint, Severity};

    fn new_event(description: &str) -> NewOutburstEvent {
        NewOutburstEvent {
            location: GeoPoint::new(31.0, 78.0),
            severity: Severity::Medium,
            detected_at: Utc::now(),
            description: description.to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn starts_with_seed() {
        let store = EventStore::load(LocalStore::in_memory()).await;
        assert_eq!(store.len().await, 3);
        assert!(!store.is_empty().await);
    }

    #[tokio::test]
    async fn append_assigns_next_id() {
        let store = EventStore::seeded(LocalStore::in_memory());
        let first = store.append(new_event("a")).await;
        let second = store.append(new_event("b")).await;
        assert_eq!(first.id, EventId::new(4));
        assert_eq!(second.id, EventId::new(5));
        assert_eq!(store.len().await, 5);
    }

    #[tokio::test]
    async fn get_existing_and_missing() {
        let store = EventStore::seeded(LocalStore::in_memory());
        let Ok(event) = store.get(EventId::new(2)).await else {
            panic!("seed event 2 exists");
        };
        assert_eq!(event.severity, Severity::Medium);
        assert!(matches!(
            store.get(EventId::new(99)).await,
            Err(GlacierError::EventNotFound(_))
        ));
    }

    #[tokio::test]
    async fn appended_events_survive_reload() {
        let local = LocalStore::in_memory();
        let store = EventStore::load(local.clone()).await;
        let added = store.append(new_event("persisted")).await;

        let reopened = EventStore::load(local).await;
        assert_eq!(reopened.len().await, 4);
        let Ok(found) = reopened.get(added.id).await else {
            panic!("appended event should be in snapshot");
        };
        assert_eq!(found.description, "persisted");
    }

    #[tokio::test]
    async fn reload_picks_up_external_snapshot() {
        let local = LocalStore::in_memory();
        let store = EventStore::seeded(local.clone());

        let only_one: Vec<OutburstEvent> = seed_events(Utc::now()).into_iter().take(1).collect();
        let Ok(()) = local.set(EVENTS_KEY, &only_one).await else {
            panic!("set failed");
        };
        assert_eq!(store.reload().await, 1);
    }

    #[tokio::test]
    async fn corrupt_snapshot_falls_back_to_seed() {
        let local = LocalStore::in_memory();
        let Ok(()) = local.set_raw(EVENTS_KEY, "[{\"id\":").await else {
            panic!("set_raw failed");
        };
        let store = EventStore::load(local).await;
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn id_after_max_takes_lowest_free_slot() {
        let local = LocalStore::in_memory();
        let mut events = seed_events(Utc::now());
        if let Some(last) = events.last_mut() {
            last.id = EventId::new(u64::MAX);
        }
        let Ok(()) = local.set(EVENTS_KEY, &events).await else {
            panic!("set failed");
        };
        let store = EventStore::load(local).await;
        let added = store.append(new_event("after max")).await;
        assert_eq!(added.id, EventId::new(3));

        let again = store.append(new_event("after max again")).await;
        assert_eq!(again.id, EventId::new(4));

        let ids: HashSet<EventId> = store.list().await.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), store.len().await);
    }

    #[tokio::test]
    async fn append_with_nearby_sees_only_earlier_events() {
        let store = EventStore::seeded(LocalStore::in_memory());
        let mut here = new_event("first");
        here.location = GeoPoint::new(30.0869, 79.3199);

        let (first, nearby) = store.append_with_nearby(here.clone(), Some(1.0)).await;
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby.first().map(|(e, _)| e.id), Some(EventId::new(3)));

        let (_, nearby) = store.append_with_nearby(here, Some(1.0)).await;
        let ids: Vec<EventId> = nearby.iter().map(|(e, _)| e.id).collect();
        assert_eq!(ids, vec![EventId::new(3), first.id]);
    }

    #[tokio::test]
    async fn ids_stay_unique_after_gap() {
        let local = LocalStore::in_memory();
        let mut events = seed_events(Utc::now());
        events.retain(|e| e.id != EventId::new(2));
        let Ok(()) = local.set(EVENTS_KEY, &events).await else {
            panic!("set failed");
        };
        let store = EventStore::load(local).await;
        let added = store.append(new_event("after gap")).await;
        assert_eq!(added.id, EventId::new(4));
    }
}
