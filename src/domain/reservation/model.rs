//! Reservation domain entity

use chrono::{DateTime, Utc};

use crate::domain::court::CourtPriceConfig;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::schedule::CanonicalDay;

/// Reservation status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Holds its (day, court, slot) triple
    Active,
    /// Cancelled by the operator; the slot is free again
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Active" => Self::Active,
            _ => Self::Cancelled,
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment state of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentState {
    /// Paid in full
    Full,
    /// Deposit collected, remainder owed
    Deposit,
    /// Nothing collected yet
    Unpaid,
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "FULL",
            Self::Deposit => "DEPOSIT",
            Self::Unpaid => "UNPAID",
        }
    }

    /// Parse a payment-state tag. Any tag outside the enumeration is
    /// rejected; amounts must never be derived from a guess.
    pub fn parse(tag: &str) -> DomainResult<Self> {
        match tag {
            "FULL" => Ok(Self::Full),
            "DEPOSIT" => Ok(Self::Deposit),
            "UNPAID" => Ok(Self::Unpaid),
            other => Err(DomainError::InvalidPaymentState(other.to_string())),
        }
    }

    /// Map this state plus a court's price configuration to the pair
    /// (full_amount_charged, deposit_amount_charged).
    ///
    /// Pure and deterministic; both fields are always computed together.
    pub fn resolve_amounts(&self, config: &CourtPriceConfig) -> (i64, i64) {
        match self {
            Self::Full => (config.full_amount, 0),
            Self::Deposit => (0, config.deposit_amount),
            Self::Unpaid => (0, 0),
        }
    }
}

impl std::fmt::Display for PaymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A booked (day, court, slot) triple with its payment bookkeeping.
///
/// `day` and `court_name` are frozen after creation: the slot uniqueness
/// guarantee is keyed on them, and moving a reservation is modeled as
/// cancel + rebook.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: String,
    /// Canonical calendar day, derived once via the day anchor
    pub day: CanonicalDay,
    pub court_name: String,
    /// One of the 16 catalog slot labels
    pub slot: String,
    /// External client reference
    pub client_ref: String,
    pub payment_state: PaymentState,
    /// Free-form tag: card, cash, transfer, debit, ...
    pub payment_method: String,
    pub full_amount_charged: i64,
    pub deposit_amount_charged: i64,
    pub status: ReservationStatus,
    pub created_by: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Build a new active reservation, deriving both monetary fields from
    /// the payment state and the court's price configuration.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        day: CanonicalDay,
        config: &CourtPriceConfig,
        slot: impl Into<String>,
        client_ref: impl Into<String>,
        payment_state: PaymentState,
        payment_method: impl Into<String>,
        created_by: impl Into<String>,
        note: Option<String>,
    ) -> Self {
        let (full, deposit) = payment_state.resolve_amounts(config);
        let now = Utc::now();
        Self {
            id: id.into(),
            day,
            court_name: config.court_name.clone(),
            slot: slot.into(),
            client_ref: client_ref.into(),
            payment_state,
            payment_method: payment_method.into(),
            full_amount_charged: full,
            deposit_amount_charged: deposit,
            status: ReservationStatus::Active,
            created_by: created_by.into(),
            note,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to a new payment state, recomputing both amount fields from the
    /// court's current price configuration. Never patches one field alone.
    pub fn apply_payment_state(&mut self, state: PaymentState, config: &CourtPriceConfig) {
        let (full, deposit) = state.resolve_amounts(config);
        self.payment_state = state;
        self.full_amount_charged = full;
        self.deposit_amount_charged = deposit;
        self.updated_at = Utc::now();
    }

    /// Cancel this reservation, releasing its slot
    pub fn cancel(&mut self) {
        self.status = ReservationStatus::Cancelled;
        self.updated_at = Utc::now();
    }

    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::court::CourtStatus;

    fn court_a() -> CourtPriceConfig {
        CourtPriceConfig {
            id: 1,
            court_name: "A".into(),
            full_amount: 1000,
            deposit_amount: 300,
            status: CourtStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_reservation(state: PaymentState) -> Reservation {
        Reservation::new(
            "r-1",
            CanonicalDay::anchor("2024-05-01").unwrap(),
            &court_a(),
            "10:00",
            "client-7",
            state,
            "card",
            "operator",
            None,
        )
    }

    #[test]
    fn full_charges_full_amount_only() {
        let r = sample_reservation(PaymentState::Full);
        assert_eq!(r.full_amount_charged, 1000);
        assert_eq!(r.deposit_amount_charged, 0);
    }

    #[test]
    fn deposit_charges_deposit_only() {
        let r = sample_reservation(PaymentState::Deposit);
        assert_eq!(r.full_amount_charged, 0);
        assert_eq!(r.deposit_amount_charged, 300);
    }

    #[test]
    fn unpaid_charges_nothing() {
        let r = sample_reservation(PaymentState::Unpaid);
        assert_eq!(r.full_amount_charged, 0);
        assert_eq!(r.deposit_amount_charged, 0);
    }

    #[test]
    fn at_most_one_amount_field_is_nonzero() {
        for state in [PaymentState::Full, PaymentState::Deposit, PaymentState::Unpaid] {
            let (full, deposit) = state.resolve_amounts(&court_a());
            assert!(
                full == 0 || deposit == 0,
                "{state}: both amounts nonzero ({full}, {deposit})"
            );
        }
    }

    #[test]
    fn payment_state_transition_recomputes_both_fields() {
        let mut r = sample_reservation(PaymentState::Deposit);
        r.apply_payment_state(PaymentState::Full, &court_a());
        assert_eq!(r.payment_state, PaymentState::Full);
        assert_eq!(r.full_amount_charged, 1000);
        // no stale deposit left behind
        assert_eq!(r.deposit_amount_charged, 0);
    }

    #[test]
    fn all_states_reachable_from_each_other() {
        let court = court_a();
        let states = [PaymentState::Full, PaymentState::Deposit, PaymentState::Unpaid];
        for from in states {
            for to in states {
                let mut r = sample_reservation(from);
                r.apply_payment_state(to, &court);
                assert_eq!(r.payment_state, to);
                assert_eq!(
                    (r.full_amount_charged, r.deposit_amount_charged),
                    to.resolve_amounts(&court)
                );
            }
        }
    }

    #[test]
    fn parse_rejects_unknown_tags() {
        assert_eq!(PaymentState::parse("FULL").unwrap(), PaymentState::Full);
        assert_eq!(PaymentState::parse("DEPOSIT").unwrap(), PaymentState::Deposit);
        assert_eq!(PaymentState::parse("UNPAID").unwrap(), PaymentState::Unpaid);
        assert!(matches!(
            PaymentState::parse("PARTIAL"),
            Err(DomainError::InvalidPaymentState(_))
        ));
        // case sensitive on purpose
        assert!(PaymentState::parse("full").is_err());
    }

    #[test]
    fn cancel_releases_the_slot() {
        let mut r = sample_reservation(PaymentState::Full);
        assert!(r.is_active());
        r.cancel();
        assert_eq!(r.status, ReservationStatus::Cancelled);
        assert!(!r.is_active());
    }

    #[test]
    fn status_roundtrip() {
        assert_eq!(ReservationStatus::from_str("Active"), ReservationStatus::Active);
        assert_eq!(
            ReservationStatus::from_str("Cancelled"),
            ReservationStatus::Cancelled
        );
        assert_eq!(
            ReservationStatus::from_str("garbage"),
            ReservationStatus::Cancelled
        );
    }
}
