pub mod availability;
pub mod booking;
pub mod revenue;

mod store;

pub use availability::AvailabilityService;
pub use booking::{BookingService, NewReservation, ReservationPatch};
pub use revenue::{RevenueQuery, RevenueService, RevenueSummary, WILDCARD};
