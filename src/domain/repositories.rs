//! Repository provider for the domain layer

use super::client::ClientRepository;
use super::court::CourtRepository;
use super::reservation::ReservationRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let config = repos.courts().find_active_by_name("A").await?;
///     let taken = repos.reservations().find_active_for_day_court(day, "A").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn reservations(&self) -> &dyn ReservationRepository;
    fn courts(&self) -> &dyn CourtRepository;
    fn clients(&self) -> &dyn ClientRepository;
}
