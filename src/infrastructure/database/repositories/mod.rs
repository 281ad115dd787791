//! SeaORM repository implementations

pub mod client_repository;
pub mod court_repository;
pub mod repository_provider;
pub mod reservation_repository;

pub use client_repository::SeaOrmClientRepository;
pub use court_repository::SeaOrmCourtRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use reservation_repository::SeaOrmReservationRepository;
