//! Notification events
//!
//! Reservation lifecycle events published after successful writes.
//! Delivery is fire-and-forget: a publish failure never affects the
//! reservation that triggered it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// A slot was booked
    ReservationCreated(ReservationEvent),
    /// An existing booking changed (payment state, slot, note, ...)
    ReservationUpdated(ReservationEvent),
    /// A booking was cancelled, releasing its slot
    ReservationCancelled(ReservationEvent),
}

impl Event {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::ReservationCreated(_) => "reservation_created",
            Event::ReservationUpdated(_) => "reservation_updated",
            Event::ReservationCancelled(_) => "reservation_cancelled",
        }
    }

    /// The court the event concerns
    pub fn court_name(&self) -> &str {
        match self {
            Event::ReservationCreated(e)
            | Event::ReservationUpdated(e)
            | Event::ReservationCancelled(e) => &e.court_name,
        }
    }
}

/// Payload shared by all reservation lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationEvent {
    pub reservation_id: String,
    /// Canonical day, formatted YYYY-MM-DD
    pub day: String,
    pub court_name: String,
    pub slot: String,
    pub client_ref: String,
    pub payment_state: String,
    pub timestamp: DateTime<Utc>,
}

/// Wrapper for sending events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}
