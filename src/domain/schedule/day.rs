//! Canonical calendar-day anchoring
//!
//! Every component that compares days (availability, conflict checks,
//! revenue grouping) relies on two raw inputs for the same local day
//! anchoring to the same `CanonicalDay` value. Raw dates arrive in
//! heterogeneous shapes (date-only strings, full timestamps); they are
//! normalized here, at the boundary, and nowhere else.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Fixed positive offset applied to UTC midnight so the anchor timestamp
/// always falls inside the intended local calendar day, regardless of the
/// caller's own timezone serialization quirks.
pub const ANCHOR_OFFSET_HOURS: i64 = 3;

/// A calendar day normalized through the day anchor.
///
/// Equality and ordering are on the calendar date itself; the anchored
/// timestamp is what gets persisted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CanonicalDay(NaiveDate);

impl CanonicalDay {
    /// Normalize a raw date representation to a canonical day.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and the common
    /// `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD HH:MM:SS` shapes. Timestamps
    /// are reduced to their UTC calendar date before anchoring.
    pub fn anchor(raw: &str) -> DomainResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DomainError::MissingParameter { field: "date" });
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Self(date));
        }

        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self(ts.with_timezone(&Utc).date_naive()));
        }

        for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Ok(Self(naive.date()));
            }
        }

        Err(DomainError::InvalidDate(raw.to_string()))
    }

    /// Reconstruct a canonical day from a persisted anchor timestamp.
    pub fn from_timestamp(ts: DateTime<Utc>) -> Self {
        Self((ts - Duration::hours(ANCHOR_OFFSET_HOURS)).date_naive())
    }

    /// The stable anchor timestamp persisted for this day:
    /// UTC midnight shifted by [`ANCHOR_OFFSET_HOURS`].
    pub fn timestamp(&self) -> DateTime<Utc> {
        let midnight = NaiveDateTime::new(self.0, NaiveTime::MIN);
        DateTime::from_naive_utc_and_offset(midnight, Utc) + Duration::hours(ANCHOR_OFFSET_HOURS)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn succ(&self) -> Self {
        Self(self.0 + Duration::days(1))
    }
}

impl std::fmt::Display for CanonicalDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_only_string_anchors() {
        let day = CanonicalDay::anchor("2024-05-01").unwrap();
        assert_eq!(day.to_string(), "2024-05-01");
    }

    #[test]
    fn same_local_day_anchors_identically() {
        // All of these denote 2024-05-01 in UTC terms.
        let inputs = [
            "2024-05-01",
            "2024-05-01T00:00:00Z",
            "2024-05-01T14:30:00Z",
            "2024-05-01T23:59:59+00:00",
            "2024-05-01T10:00:00",
            "2024-05-01 10:00:00",
        ];
        let first = CanonicalDay::anchor(inputs[0]).unwrap();
        for raw in &inputs[1..] {
            assert_eq!(CanonicalDay::anchor(raw).unwrap(), first, "input: {raw}");
        }
    }

    #[test]
    fn offset_timestamp_uses_utc_calendar_date() {
        // 23:30 in UTC-4 is already 03:30 next day in UTC.
        let day = CanonicalDay::anchor("2024-05-01T23:30:00-04:00").unwrap();
        assert_eq!(day.to_string(), "2024-05-02");
    }

    #[test]
    fn anchor_timestamp_is_offset_from_midnight() {
        let day = CanonicalDay::anchor("2024-05-01").unwrap();
        assert_eq!(day.timestamp().to_rfc3339(), "2024-05-01T03:00:00+00:00");
    }

    #[test]
    fn timestamp_roundtrip_is_stable() {
        let day = CanonicalDay::anchor("2024-12-31").unwrap();
        assert_eq!(CanonicalDay::from_timestamp(day.timestamp()), day);
    }

    #[test]
    fn garbage_input_is_invalid_date() {
        let err = CanonicalDay::anchor("next tuesday").unwrap_err();
        assert!(matches!(err, DomainError::InvalidDate(_)));
    }

    #[test]
    fn blank_input_is_missing_parameter() {
        let err = CanonicalDay::anchor("   ").unwrap_err();
        assert!(matches!(
            err,
            DomainError::MissingParameter { field: "date" }
        ));
    }

    #[test]
    fn days_are_ordered() {
        let a = CanonicalDay::anchor("2024-05-01").unwrap();
        let b = CanonicalDay::anchor("2024-05-02").unwrap();
        assert!(a < b);
        assert_eq!(a.succ(), b);
    }
}
