//! Database entities module

pub mod client;
pub mod court;
pub mod reservation;

pub use client::Entity as Client;
pub use court::Entity as Court;
pub use reservation::Entity as Reservation;
