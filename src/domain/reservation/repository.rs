//! Reservation repository interface

use async_trait::async_trait;

use super::model::{PaymentState, Reservation};
use crate::domain::schedule::CanonicalDay;
use crate::domain::DomainResult;

/// Filters for the revenue report query. `None` on a dimension means the
/// "ALL" wildcard: widen the match set along that dimension only.
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub court_name: Option<String>,
    pub payment_method: Option<String>,
    pub payment_state: Option<PaymentState>,
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a new reservation.
    ///
    /// The store enforces uniqueness of active (day, court, slot) triples;
    /// a violation surfaces as `SlotAlreadyTaken`. This is the single
    /// atomic write backing the conflict guard.
    async fn insert(&self, reservation: Reservation) -> DomainResult<()>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>>;

    /// Update an existing reservation
    async fn update(&self, reservation: Reservation) -> DomainResult<()>;

    /// All active reservations for a (day, court) pair
    async fn find_active_for_day_court(
        &self,
        day: CanonicalDay,
        court_name: &str,
    ) -> DomainResult<Vec<Reservation>>;

    /// All active reservations in an inclusive day range matching the
    /// given filters, ordered by day, court, slot
    async fn find_active_in_range(
        &self,
        from: CanonicalDay,
        to: CanonicalDay,
        filter: &ReservationFilter,
    ) -> DomainResult<Vec<Reservation>>;

    /// Cancel a reservation by ID (set status = Cancelled)
    async fn cancel(&self, id: &str) -> DomainResult<()>;
}
