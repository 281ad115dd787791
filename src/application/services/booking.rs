//! Booking service: slot conflict guard plus payment bookkeeping
//!
//! Create re-validates at write time and relies on the store's uniqueness
//! guarantee for active (day, court, slot) triples, so under concurrent
//! requests for the same slot exactly one insert succeeds. Never guarded
//! by an in-process lock: the service may run as multiple processes.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::application::services::store::store_call;
use crate::auth::AuthContext;
use crate::domain::schedule::{is_catalog_slot, CanonicalDay};
use crate::domain::{
    CourtPriceConfig, DomainError, DomainResult, PaymentState, RepositoryProvider, Reservation,
    ReservationFilter,
};
use crate::notifications::{Event, ReservationEvent, SharedEventBus};
use crate::shared::retry::{retry_with_backoff, RetryConfig};

/// Input for a new booking. Raw strings from the boundary; the service
/// normalizes and validates everything.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub date: String,
    pub court_name: String,
    pub slot: String,
    pub client_ref: String,
    pub payment_state: String,
    pub payment_method: String,
    pub note: Option<String>,
}

/// Partial update for an existing booking. `day` and `court_name` are
/// intentionally present so that an attempt to change them can be rejected
/// explicitly instead of silently ignored.
#[derive(Debug, Clone, Default)]
pub struct ReservationPatch {
    pub date: Option<String>,
    pub court_name: Option<String>,
    pub slot: Option<String>,
    pub client_ref: Option<String>,
    pub payment_state: Option<String>,
    pub payment_method: Option<String>,
    pub note: Option<String>,
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    event_bus: SharedEventBus,
    store_timeout: Duration,
}

impl BookingService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        event_bus: SharedEventBus,
        store_timeout: Duration,
    ) -> Self {
        Self {
            repos,
            event_bus,
            store_timeout,
        }
    }

    /// Book a slot. Fails with `SlotAlreadyTaken` if another active
    /// reservation holds the (day, court, slot) triple.
    pub async fn create(
        &self,
        ctx: &AuthContext,
        input: NewReservation,
    ) -> DomainResult<Reservation> {
        let court_name = required(&input.court_name, "court")?;
        let slot = required(&input.slot, "slot")?;
        let client_ref = required(&input.client_ref, "client_ref")?;
        let payment_method = required(&input.payment_method, "payment_method")?;

        let day = CanonicalDay::anchor(&input.date)?;
        validate_slot(&slot)?;
        let payment_state = PaymentState::parse(input.payment_state.trim())?;

        let config = self.lookup_court(&court_name).await?;
        self.ensure_client(&client_ref).await?;

        let reservation = Reservation::new(
            Uuid::new_v4().to_string(),
            day,
            &config,
            slot,
            client_ref,
            payment_state,
            payment_method,
            ctx.user.clone(),
            input.note,
        );

        // Single atomic write; the partial unique index is the arbiter
        // under concurrency.
        store_call(
            self.store_timeout,
            "reservations.insert",
            self.repos.reservations().insert(reservation.clone()),
        )
        .await?;

        info!(
            reservation_id = %reservation.id,
            day = %reservation.day,
            court = %reservation.court_name,
            slot = %reservation.slot,
            payment_state = %reservation.payment_state,
            created_by = %ctx.user,
            "Reservation created"
        );
        self.publish(&reservation, EventKind::Created);

        Ok(reservation)
    }

    /// Apply a partial update. `day` and `court_name` are immutable; a
    /// payment-state change recomputes both amount fields together.
    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: &str,
        patch: ReservationPatch,
    ) -> DomainResult<Reservation> {
        if patch.date.is_some() {
            return Err(DomainError::ImmutableField("day"));
        }
        if patch.court_name.is_some() {
            return Err(DomainError::ImmutableField("court_name"));
        }

        let mut reservation = self.fetch(id).await?;
        if !reservation.is_active() {
            return Err(DomainError::Validation(format!(
                "reservation {id} is cancelled"
            )));
        }

        if let Some(slot) = patch.slot {
            let slot = required(&slot, "slot")?;
            validate_slot(&slot)?;
            reservation.slot = slot;
        }

        if let Some(client_ref) = patch.client_ref {
            let client_ref = required(&client_ref, "client_ref")?;
            self.ensure_client(&client_ref).await?;
            reservation.client_ref = client_ref;
        }

        if let Some(tag) = patch.payment_state {
            let state = PaymentState::parse(tag.trim())?;
            let config = self.lookup_court(&reservation.court_name).await?;
            reservation.apply_payment_state(state, &config);
        }

        if let Some(method) = patch.payment_method {
            reservation.payment_method = required(&method, "payment_method")?;
        }

        if let Some(note) = patch.note {
            reservation.note = Some(note);
        }

        reservation.updated_at = Utc::now();

        // A slot change competes for the new triple like a fresh booking;
        // the store maps a uniqueness violation to SlotAlreadyTaken here too.
        store_call(
            self.store_timeout,
            "reservations.update",
            self.repos.reservations().update(reservation.clone()),
        )
        .await?;

        info!(
            reservation_id = %reservation.id,
            payment_state = %reservation.payment_state,
            updated_by = %ctx.user,
            "Reservation updated"
        );
        self.publish(&reservation, EventKind::Updated);

        Ok(reservation)
    }

    /// Cancel a reservation, releasing its slot. Cancelling twice is a no-op.
    pub async fn cancel(&self, ctx: &AuthContext, id: &str) -> DomainResult<()> {
        let mut reservation = self.fetch(id).await?;
        if !reservation.is_active() {
            return Ok(());
        }

        store_call(
            self.store_timeout,
            "reservations.cancel",
            self.repos.reservations().cancel(id),
        )
        .await?;
        reservation.cancel();

        info!(
            reservation_id = %reservation.id,
            day = %reservation.day,
            court = %reservation.court_name,
            slot = %reservation.slot,
            cancelled_by = %ctx.user,
            "Reservation cancelled"
        );
        self.publish(&reservation, EventKind::Cancelled);

        Ok(())
    }

    pub async fn get(&self, id: &str) -> DomainResult<Reservation> {
        self.fetch(id).await
    }

    /// Active reservations for a day, optionally restricted to one court.
    pub async fn list_for_day(
        &self,
        raw_date: &str,
        court_name: Option<&str>,
    ) -> DomainResult<Vec<Reservation>> {
        let day = CanonicalDay::anchor(raw_date)?;
        let filter = ReservationFilter {
            court_name: court_name.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
            ..Default::default()
        };
        retry_with_backoff(
            RetryConfig::default(),
            || {
                store_call(
                    self.store_timeout,
                    "reservations.find_active_in_range",
                    self.repos
                        .reservations()
                        .find_active_in_range(day, day, &filter),
                )
            },
            DomainError::is_transient,
            "booking.list_for_day",
        )
        .await
    }

    // Read paths retry on transient store errors within the shared budget.
    // The insert itself never retries: a retried insert that actually
    // committed would collide with its own row and misreport
    // SlotAlreadyTaken.

    async fn fetch(&self, id: &str) -> DomainResult<Reservation> {
        retry_with_backoff(
            RetryConfig::default(),
            || {
                store_call(
                    self.store_timeout,
                    "reservations.find_by_id",
                    self.repos.reservations().find_by_id(id),
                )
            },
            DomainError::is_transient,
            "booking.fetch",
        )
        .await?
        .ok_or_else(|| DomainError::NotFound {
            entity: "Reservation",
            field: "id",
            value: id.to_string(),
        })
    }

    async fn lookup_court(&self, court_name: &str) -> DomainResult<CourtPriceConfig> {
        retry_with_backoff(
            RetryConfig::default(),
            || {
                store_call(
                    self.store_timeout,
                    "courts.find_active_by_name",
                    self.repos.courts().find_active_by_name(court_name),
                )
            },
            DomainError::is_transient,
            "booking.lookup_court",
        )
        .await?
        .ok_or_else(|| DomainError::UnknownCourt(court_name.to_string()))
    }

    async fn ensure_client(&self, client_ref: &str) -> DomainResult<()> {
        let exists = retry_with_backoff(
            RetryConfig::default(),
            || {
                store_call(
                    self.store_timeout,
                    "clients.exists",
                    self.repos.clients().exists(client_ref),
                )
            },
            DomainError::is_transient,
            "booking.ensure_client",
        )
        .await?;
        if exists {
            Ok(())
        } else {
            Err(DomainError::UnknownClient(client_ref.to_string()))
        }
    }

    fn publish(&self, reservation: &Reservation, kind: EventKind) {
        let payload = ReservationEvent {
            reservation_id: reservation.id.clone(),
            day: reservation.day.to_string(),
            court_name: reservation.court_name.clone(),
            slot: reservation.slot.clone(),
            client_ref: reservation.client_ref.clone(),
            payment_state: reservation.payment_state.as_str().to_string(),
            timestamp: Utc::now(),
        };
        let event = match kind {
            EventKind::Created => Event::ReservationCreated(payload),
            EventKind::Updated => Event::ReservationUpdated(payload),
            EventKind::Cancelled => Event::ReservationCancelled(payload),
        };
        // Fire-and-forget: notification failures never roll back a write.
        self.event_bus.publish(event);
    }
}

enum EventKind {
    Created,
    Updated,
    Cancelled,
}

fn required(value: &str, field: &'static str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DomainError::MissingParameter { field })
    } else {
        Ok(trimmed.to_string())
    }
}

fn validate_slot(slot: &str) -> DomainResult<()> {
    if is_catalog_slot(slot) {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "unknown slot label: {slot}"
        )))
    }
}

// ── Tests ──────────────────────────────────────────────────────
