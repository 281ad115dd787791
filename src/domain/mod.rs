pub mod client;
pub mod court;
pub mod error;
pub mod repositories;
pub mod reservation;
pub mod schedule;

// Re-export commonly used types
pub use client::ClientRepository;
pub use court::{CourtPriceConfig, CourtRepository, CourtStatus};
pub use error::{DomainError, DomainResult};
pub use repositories::RepositoryProvider;
pub use reservation::{
    PaymentState, Reservation, ReservationFilter, ReservationRepository, ReservationStatus,
};
pub use schedule::{CanonicalDay, SLOT_CATALOG};
