//! Free-slot computation for a (day, court) pair
//!
//! Read-only: catalog minus the slots held by active reservations. The
//! result may be stale by the time a booking lands; the booking path
//! re-validates at write time, so read-committed staleness is acceptable.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::store::store_call;
use crate::domain::schedule::{free_slots, CanonicalDay};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::retry::{retry_with_backoff, RetryConfig};

pub struct AvailabilityService {
    repos: Arc<dyn RepositoryProvider>,
    store_timeout: Duration,
}

impl AvailabilityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, store_timeout: Duration) -> Self {
        Self {
            repos,
            store_timeout,
        }
    }

    /// Free slots for the given raw date and court, in catalog order.
    pub async fn available_slots(
        &self,
        raw_date: &str,
        court_name: &str,
    ) -> DomainResult<Vec<&'static str>> {
        let court_name = court_name.trim();
        if court_name.is_empty() {
            return Err(DomainError::MissingParameter { field: "court" });
        }
        let day = CanonicalDay::anchor(raw_date)?;

        let active = retry_with_backoff(
            RetryConfig::default(),
            || self.fetch_active(day, court_name),
            DomainError::is_transient,
            "available_slots",
        )
        .await?;

        let occupied: Vec<&str> = active.iter().map(|r| r.slot.as_str()).collect();
        Ok(free_slots(occupied))
    }

    async fn fetch_active(
        &self,
        day: CanonicalDay,
        court_name: &str,
    ) -> DomainResult<Vec<crate::domain::Reservation>> {
        store_call(
            self.store_timeout,
            "reservations.find_active_for_day_court",
            self.repos
                .reservations()
                .find_active_for_day_court(day, court_name),
        )
        .await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{court_config, provider_with, reservation_on};
    use crate::domain::{PaymentState, ReservationRepository, SLOT_CATALOG};

    fn service(repos: Arc<dyn RepositoryProvider>) -> AvailabilityService {
        AvailabilityService::new(repos, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn empty_day_returns_full_catalog() {
        let repos = provider_with(vec![court_config("A", 1000, 300)], vec!["client-7"]);
        let slots = service(repos)
            .available_slots("2024-05-01", "A")
            .await
            .unwrap();
        assert_eq!(slots, SLOT_CATALOG.to_vec());
    }

    #[tokio::test]
    async fn occupied_slots_are_subtracted() {
        let court = court_config("A", 1000, 300);
        let repos = provider_with(vec![court.clone()], vec!["client-7"]);
        repos
            .reservations()
            .insert(reservation_on("2024-05-01", &court, "10:00", PaymentState::Full))
            .await
            .unwrap();

        let free = service(repos)
            .available_slots("2024-05-01", "A")
            .await
            .unwrap();
        assert_eq!(free.len(), 15);
        assert!(!free.contains(&"10:00"));
    }

    #[tokio::test]
    async fn free_and_occupied_partition_catalog() {
        let court = court_config("A", 1000, 300);
        let repos = provider_with(vec![court.clone()], vec!["client-7"]);
        for slot in ["08:00", "12:00", "23:00"] {
            repos
                .reservations()
                .insert(reservation_on("2024-05-01", &court, slot, PaymentState::Unpaid))
                .await
                .unwrap();
        }

        let free = service(repos)
            .available_slots("2024-05-01", "A")
            .await
            .unwrap();
        assert_eq!(free.len(), 13);
        for slot in ["08:00", "12:00", "23:00"] {
            assert!(!free.contains(&slot));
        }
    }

    #[tokio::test]
    async fn other_courts_and_days_do_not_interfere() {
        let court_a = court_config("A", 1000, 300);
        let court_b = court_config("B", 1500, 500);
        let repos = provider_with(vec![court_a.clone(), court_b.clone()], vec!["client-7"]);
        repos
            .reservations()
            .insert(reservation_on("2024-05-01", &court_b, "10:00", PaymentState::Full))
            .await
            .unwrap();
        repos
            .reservations()
            .insert(reservation_on("2024-05-02", &court_a, "10:00", PaymentState::Full))
            .await
            .unwrap();

        let free = service(repos)
            .available_slots("2024-05-01", "A")
            .await
            .unwrap();
        assert_eq!(free, SLOT_CATALOG.to_vec());
    }

    #[tokio::test]
    async fn date_representations_agree() {
        let court = court_config("A", 1000, 300);
        let repos = provider_with(vec![court.clone()], vec!["client-7"]);
        repos
            .reservations()
            .insert(reservation_on("2024-05-01", &court, "10:00", PaymentState::Full))
            .await
            .unwrap();

        let svc = service(repos);
        for raw in ["2024-05-01", "2024-05-01T18:45:00Z", "2024-05-01 06:00:00"] {
            let free = svc.available_slots(raw, "A").await.unwrap();
            assert!(!free.contains(&"10:00"), "raw date: {raw}");
        }
    }

    #[tokio::test]
    async fn blank_court_is_missing_parameter() {
        let repos = provider_with(vec![], vec![]);
        let err = service(repos)
            .available_slots("2024-05-01", "  ")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::MissingParameter { field: "court" }
        ));
    }

    #[tokio::test]
    async fn bad_date_is_invalid_date() {
        let repos = provider_with(vec![], vec![]);
        let err = service(repos)
            .available_slots("01/05/2024", "A")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDate(_)));
    }
}
