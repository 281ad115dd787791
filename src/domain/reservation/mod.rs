pub mod model;
pub mod repository;

pub use model::{PaymentState, Reservation, ReservationStatus};
pub use repository::{ReservationFilter, ReservationRepository};
