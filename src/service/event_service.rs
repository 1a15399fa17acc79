//! Event service: stores outburst events, reports neighbours, and feeds
//! the live bus.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::proximity::within_radius;
use crate::domain::{EventBus, EventId, EventStore, FeedEvent, GeoPoint, NewOutburstEvent, OutburstEvent};
use crate::error::GlacierError;

/// An event together with its distance from a reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyEvent {
    /// The neighbouring event.
    pub event: OutburstEvent,
    /// Great-circle distance in kilometres.
    pub distance_km: f64,
}

/// Result of [`EventService::add_event`].
#[derive(Debug, Clone)]
pub struct AddedEvent {
    /// The stored event with its assigned ID.
    pub event: OutburstEvent,
    /// Earlier events within the nearby radius of the new one.
    pub nearby: Vec<NearbyEvent>,
}

/// Orchestration layer for outburst events.
///
/// Every mutation follows the same path: validate, write to the
/// [`EventStore`], log, publish a [`FeedEvent`].
#[derive(Debug, Clone)]
pub struct EventService {
    store: Arc<EventStore>,
    event_bus: EventBus,
    nearby_radius_km: f64,
}

impl EventService {
    /// Creates a new `EventService`.
    #[must_use]
    pub fn new(store: Arc<EventStore>, event_bus: EventBus, nearby_radius_km: f64) -> Self {
        Self {
            store,
            event_bus,
            nearby_radius_km,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`EventStore`].
    #[must_use]
    pub fn store(&self) -> &Arc<EventStore> {
        &self.store
    }

    /// Radius used when a new event reports its neighbours.
    #[must_use]
    pub fn nearby_radius_km(&self) -> f64 {
        self.nearby_radius_km
    }

    /// Returns every stored event.
    pub async fn list_events(&self) -> Vec<OutburstEvent> {
        self.store.list().await
    }

    /// Returns one event.
    ///
    /// # Errors
    ///
    /// Returns [`GlacierError::EventNotFound`] if the ID is unknown.
    pub async fn get_event(&self, id: EventId) -> Result<OutburstEvent, GlacierError> {
        self.store.get(id).await
    }

    /// Stores a new event and reports the earlier events within the nearby
    /// radius of it.
    ///
    /// # Errors
    ///
    /// Returns [`GlacierError::InvalidRequest`] if the location is out of
    /// range.
    pub async fn add_event(&self, new_event: NewOutburstEvent) -> Result<AddedEvent, GlacierError> {
        new_event.location.validate()?;

        let (event, neighbours) = self
            .store
            .append_with_nearby(new_event, Some(self.nearby_radius_km))
            .await;
        let nearby: Vec<NearbyEvent> = neighbours
            .into_iter()
            .map(|(event, distance_km)| NearbyEvent { event, distance_km })
            .collect();
        log_nearby(&event, &nearby, self.nearby_radius_km);

        let _ = self.event_bus.publish(FeedEvent::EventAdded {
            event: event.clone(),
            nearby_count: nearby.len(),
            timestamp: Utc::now(),
        });

        tracing::info!(event_id = %event.id, severity = %event.severity, "outburst event added");
        Ok(AddedEvent { event, nearby })
    }

    /// Returns the events within `radius_km` of `point`, closest first.
    ///
    /// # Errors
    ///
    /// Returns [`GlacierError::InvalidRequest`] for an out-of-range point
    /// or a negative or non-finite radius.
    pub async fn nearby(
        &self,
        point: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<NearbyEvent>, GlacierError> {
        point.validate()?;
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(GlacierError::InvalidRequest(format!(
                "invalid radius: {radius_km}"
            )));
        }

        let events = self.store.list().await;
        let mut nearby = collect_nearby(point, &events, radius_km);
        nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        Ok(nearby)
    }

    /// Reloads the event list from local persistence.
    pub async fn reload(&self) -> usize {
        let count = self.store.reload().await;
        let _ = self.event_bus.publish(FeedEvent::EventsReloaded {
            count,
            timestamp: Utc::now(),
        });
        tracing::info!(count, "event list reloaded");
        count
    }
}

fn collect_nearby(point: GeoPoint, events: &[OutburstEvent], radius_km: f64) -> Vec<NearbyEvent> {
    within_radius(point, events, radius_km)
        .into_iter()
        .map(|hit| NearbyEvent {
            event: hit.item.clone(),
            distance_km: hit.distance_km,
        })
        .collect()
}

fn log_nearby(event: &OutburstEvent, nearby: &[NearbyEvent], radius_km: f64) {
    let lat = event.location.latitude;
    let lng = event.location.longitude;
    if nearby.is_empty() {
        tracing::info!(lat, lng, radius_km, "no nearby outburst events");
        return;
    }

    tracing::info!(
        lat,
        lng,
        radius_km,
        count = nearby.len(),
        "nearby outburst events found"
    );
    for n in nearby {
        tracing::debug!(
            event_id = %n.event.id,
            description = %n.event.description,
            lat = n.event.location.latitude,
            lng = n.event.location.longitude,
            distance = %format!("{:.2} km", n.distance_km),
            "nearby event"
        );
    }
}
