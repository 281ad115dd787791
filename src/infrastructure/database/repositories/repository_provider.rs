//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::client::ClientRepository;
use crate::domain::court::CourtRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;

use super::client_repository::SeaOrmClientRepository;
use super::court_repository::SeaOrmCourtRepository;
use super::reservation_repository::SeaOrmReservationRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let court = repos.courts().find_active_by_name("Center").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    reservations: SeaOrmReservationRepository,
    courts: SeaOrmCourtRepository,
    clients: SeaOrmClientRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            reservations: SeaOrmReservationRepository::new(db.clone()),
            courts: SeaOrmCourtRepository::new(db.clone()),
            clients: SeaOrmClientRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
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
