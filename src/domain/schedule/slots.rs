//! Fixed slot catalog
//!
//! Process-wide constant configuration: 16 hourly booking windows per day,
//! 08:00 through 23:00. Not derived from any store.

/// The full ordered catalog of bookable slot labels.
pub const SLOT_CATALOG: [&str; 16] = [
    "08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00",
    "18:00", "19:00", "20:00", "21:00", "22:00", "23:00",
];

/// Whether a label is one of the 16 catalog slots.
pub fn is_catalog_slot(label: &str) -> bool {
    SLOT_CATALOG.contains(&label)
}

/// Catalog minus the occupied labels, preserving catalog order.
pub fn free_slots<'a, I>(occupied: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let occupied: Vec<&str> = occupied.into_iter().collect();
    SLOT_CATALOG
        .iter()
        .copied()
        .filter(|slot| !occupied.contains(slot))
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_sixteen_hourly_slots() {
        assert_eq!(SLOT_CATALOG.len(), 16);
        assert_eq!(SLOT_CATALOG.first(), Some(&"08:00"));
        assert_eq!(SLOT_CATALOG.last(), Some(&"23:00"));
    }

    #[test]
    fn catalog_membership() {
        assert!(is_catalog_slot("10:00"));
        assert!(!is_catalog_slot("07:00"));
        assert!(!is_catalog_slot("10:30"));
        assert!(!is_catalog_slot(""));
    }

    #[test]
    fn free_slots_subtracts_occupied_in_order() {
        let free = free_slots(["10:00", "23:00"]);
        assert_eq!(free.len(), 14);
        assert!(!free.contains(&"10:00"));
        assert!(!free.contains(&"23:00"));
        // catalog order preserved
        assert_eq!(free.first(), Some(&"08:00"));
        assert_eq!(free.last(), Some(&"22:00"));
    }

    #[test]
    fn free_and_occupied_partition_the_catalog() {
        let occupied = ["08:00", "12:00", "19:00"];
        let free = free_slots(occupied);
        assert_eq!(free.len() + occupied.len(), SLOT_CATALOG.len());
        for slot in occupied {
            assert!(!free.contains(&slot));
        }
    }

    #[test]
    fn no_occupied_returns_full_catalog() {
        assert_eq!(free_slots([]), SLOT_CATALOG.to_vec());
    }
}
