//! Court price configuration entity
//!
//! Owned by the pricing-administration side; read-only to the booking core.

use chrono::{DateTime, Utc};

/// Court configuration status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourtStatus {
    /// Bookable, participates in conflict checks and pricing
    Active,
    /// Retired configuration, invisible to the booking core
    Inactive,
}

impl CourtStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Active" => Self::Active,
            _ => Self::Inactive,
        }
    }
}

impl std::fmt::Display for CourtStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Price configuration for one physical court.
///
/// At most one Active config exists per court name. All amounts are in
/// smallest currency units (e.g. cents).
#[derive(Debug, Clone)]
pub struct CourtPriceConfig {
    pub id: i32,
    /// Unique court name, the booking key
    pub court_name: String,
    /// Price of a fully paid slot
    pub full_amount: i64,
    /// Deposit collected for a partially paid slot
    pub deposit_amount: i64,
    pub status: CourtStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CourtPriceConfig {
    pub fn is_active(&self) -> bool {
        self.status == CourtStatus::Active
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip() {
        assert_eq!(CourtStatus::from_str("Active"), CourtStatus::Active);
        assert_eq!(CourtStatus::from_str("Inactive"), CourtStatus::Inactive);
        assert_eq!(CourtStatus::from_str("bogus"), CourtStatus::Inactive);
        assert_eq!(CourtStatus::Active.as_str(), "Active");
    }

    #[test]
    fn active_check() {
        let config = CourtPriceConfig {
            id: 1,
            court_name: "A".into(),
            full_amount: 1000,
            deposit_amount: 300,
            status: CourtStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(config.is_active());
    }
}
