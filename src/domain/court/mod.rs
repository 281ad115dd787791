pub mod model;
pub mod repository;

pub use model::{CourtPriceConfig, CourtStatus};
pub use repository::CourtRepository;
