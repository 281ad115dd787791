pub mod day;
pub mod slots;

pub use day::{CanonicalDay, ANCHOR_OFFSET_HOURS};
pub use slots::{free_slots, is_catalog_slot, SLOT_CATALOG};
