//! In-memory repository fakes for service tests

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    CanonicalDay, ClientRepository, CourtPriceConfig, CourtRepository, CourtStatus, DomainError,
    DomainResult, PaymentState, RepositoryProvider, Reservation, ReservationFilter,
    ReservationRepository, ReservationStatus,
};

pub(crate) fn court_config(name: &str, full: i64, deposit: i64) -> CourtPriceConfig {
    CourtPriceConfig {
        id: 0,
        court_name: name.to_string(),
        full_amount: full,
        deposit_amount: deposit,
        status: CourtStatus::Active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// A ready-made active reservation for seeding repositories directly.
/// Amounts come from the given court config, exactly as the booking
/// service would charge them.
pub(crate) fn reservation_on(
    day: &str,
    config: &CourtPriceConfig,
    slot: &str,
    state: PaymentState,
) -> Reservation {
    Reservation::new(
        uuid::Uuid::new_v4().to_string(),
        CanonicalDay::anchor(day).unwrap(),
        config,
        slot,
        "client-7",
        state,
        "card",
        "operator",
        None,
    )
}

pub(crate) fn provider_with(
    courts: Vec<CourtPriceConfig>,
    clients: Vec<&str>,
) -> Arc<InMemoryProvider> {
    provider_with_flaky_courts(courts, clients, 0)
}

/// Like `provider_with`, but the first `failures` court lookups fail with
/// `StoreUnavailable` before the repository recovers.
pub(crate) fn provider_with_flaky_courts(
    courts: Vec<CourtPriceConfig>,
    clients: Vec<&str>,
    failures: u32,
) -> Arc<InMemoryProvider> {
    Arc::new(InMemoryProvider {
        reservations: InMemoryReservations::default(),
        courts: InMemoryCourts {
            configs: courts,
            transient_failures: AtomicU32::new(failures),
        },
        clients: InMemoryClients {
            refs: clients.into_iter().map(String::from).collect(),
        },
    })
}

pub(crate) struct InMemoryProvider {
    reservations: InMemoryReservations,
    courts: InMemoryCourts,
    clients: InMemoryClients,
}

impl RepositoryProvider for InMemoryProvider {
    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn courts(&self) -> &dyn CourtRepository {
        &self.courts
    }

    fn clients(&self) -> &dyn ClientRepository {
        &self.clients
    }
}

#[derive(Default)]
pub(crate) struct InMemoryReservations {
    rows: Mutex<Vec<Reservation>>,
}

fn conflict_error(r: &Reservation) -> DomainError {
    DomainError::SlotAlreadyTaken {
        day: r.day.to_string(),
        court: r.court_name.clone(),
        slot: r.slot.clone(),
    }
}

fn matches_filter(r: &Reservation, filter: &ReservationFilter) -> bool {
    if let Some(court) = &filter.court_name {
        if &r.court_name != court {
            return false;
        }
    }
    if let Some(method) = &filter.payment_method {
        if &r.payment_method != method {
            return false;
        }
    }
    if let Some(state) = filter.payment_state {
        if r.payment_state != state {
            return false;
        }
    }
    true
}

#[async_trait]
impl ReservationRepository for InMemoryReservations {
    async fn insert(&self, reservation: Reservation) -> DomainResult<()> {
        let mut rows = self.rows.lock().unwrap();
        // Mirrors the store-level partial unique index: the check and the
        // write happen under one lock.
        let taken = rows.iter().any(|r| {
            r.status == ReservationStatus::Active
                && r.day == reservation.day
                && r.court_name == reservation.court_name
                && r.slot == reservation.slot
        });
        if taken {
            return Err(conflict_error(&reservation));
        }
        rows.push(reservation);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn update(&self, reservation: Reservation) -> DomainResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let taken = reservation.status == ReservationStatus::Active
            && rows.iter().any(|r| {
                r.id != reservation.id
                    && r.status == ReservationStatus::Active
                    && r.day == reservation.day
                    && r.court_name == reservation.court_name
                    && r.slot == reservation.slot
            });
        if taken {
            return Err(conflict_error(&reservation));
        }
        let Some(row) = rows.iter_mut().find(|r| r.id == reservation.id) else {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: reservation.id,
            });
        };
        *row = reservation;
        Ok(())
    }

    async fn find_active_for_day_court(
        &self,
        day: CanonicalDay,
        court_name: &str,
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.is_active() && r.day == day && r.court_name == court_name)
            .cloned()
            .collect())
    }

    async fn find_active_in_range(
        &self,
        from: CanonicalDay,
        to: CanonicalDay,
        filter: &ReservationFilter,
    ) -> DomainResult<Vec<Reservation>> {
        let mut found: Vec<Reservation> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.is_active() && r.day >= from && r.day <= to && matches_filter(r, filter))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            (a.day, &a.court_name, &a.slot).cmp(&(b.day, &b.court_name, &b.slot))
        });
        Ok(found)
    }

    async fn cancel(&self, id: &str) -> DomainResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            });
        };
        row.cancel();
        Ok(())
    }
}

pub(crate) struct InMemoryCourts {
    configs: Vec<CourtPriceConfig>,
    transient_failures: AtomicU32,
}

impl InMemoryCourts {
    fn maybe_fail(&self) -> DomainResult<()> {
        if self.transient_failures.load(Ordering::SeqCst) > 0 {
            self.transient_failures.fetch_sub(1, Ordering::SeqCst);
            return Err(DomainError::StoreUnavailable(
                "simulated store outage".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CourtRepository for InMemoryCourts {
    async fn find_active_by_name(
        &self,
        court_name: &str,
    ) -> DomainResult<Option<CourtPriceConfig>> {
        self.maybe_fail()?;
        Ok(self
            .configs
            .iter()
            .find(|c| c.is_active() && c.court_name == court_name)
            .cloned())
    }

    async fn list_active(&self) -> DomainResult<Vec<CourtPriceConfig>> {
        let mut active: Vec<CourtPriceConfig> = self
            .configs
            .iter()
            .filter(|c| c.is_active())
            .cloned()
            .collect();
        active.sort_by(|a, b| a.court_name.cmp(&b.court_name));
        Ok(active)
    }
}

pub(crate) struct InMemoryClients {
    refs: HashSet<String>,
}

#[async_trait]
impl ClientRepository for InMemoryClients {
    async fn exists(&self, client_ref: &str) -> DomainResult<bool> {
        Ok(self.refs.contains(client_ref))
    }
}
