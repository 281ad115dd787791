//! API Handlers

pub mod availability;
pub mod courts;
pub mod health;
pub mod reservations;
pub mod revenue;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Json;
use tracing::error;

use crate::api::dto::ApiResponse;
use crate::application::services::{AvailabilityService, BookingService, RevenueService};
use crate::domain::{DomainError, RepositoryProvider};

/// Shared state for all REST handlers
#[derive(Clone)]
pub struct AppState {
    pub availability: Arc<AvailabilityService>,
    pub booking: Arc<BookingService>,
    pub revenue: Arc<RevenueService>,
    pub repos: Arc<dyn RepositoryProvider>,
}

/// Map a domain error to its HTTP representation.
///
/// Conflict-class errors get their own codes so clients can react without
/// parsing messages: 409 for a taken slot, 422 for frozen fields. Store
/// failure detail is logged here and never echoed to the caller.
pub fn error_response(e: DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    let (status, message) = match &e {
        DomainError::InvalidDate(_)
        | DomainError::MissingParameter { .. }
        | DomainError::InvalidPaymentState(_)
        | DomainError::Validation(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        DomainError::UnknownCourt(_)
        | DomainError::UnknownClient(_)
        | DomainError::NotFound { .. }
        | DomainError::NoMatchingReservations => (StatusCode::NOT_FOUND, e.to_string()),
        DomainError::SlotAlreadyTaken { .. } => (StatusCode::CONFLICT, e.to_string()),
        DomainError::ImmutableField(_) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        DomainError::Forbidden(_) => (StatusCode::FORBIDDEN, e.to_string()),
        DomainError::StoreUnavailable(detail) => {
            error!(detail = %detail, "Store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "store unavailable".to_string(),
            )
        }
    };
    (status, Json(ApiResponse::error(message)))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_409() {
        let (status, _) = error_response(DomainError::SlotAlreadyTaken {
            day: "2024-05-01".into(),
            court: "A".into(),
            slot: "10:00".into(),
        });
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn immutable_field_maps_to_422() {
        let (status, _) = error_response(DomainError::ImmutableField("day"));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn empty_report_maps_to_404() {
        let (status, _) = error_response(DomainError::NoMatchingReservations);
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_outage_maps_to_503_without_internal_detail() {
        let (status, Json(body)) = error_response(DomainError::StoreUnavailable(
            "database error: unable to open database file /var/lib/courtbook.db".into(),
        ));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let message = body.error.unwrap();
        assert_eq!(message, "store unavailable");
        assert!(!message.contains("database"));
    }

    #[test]
    fn conflict_body_keeps_its_message() {
        let (_, Json(body)) = error_response(DomainError::SlotAlreadyTaken {
            day: "2024-05-01".into(),
            court: "A".into(),
            slot: "10:00".into(),
        });
        assert!(body.error.unwrap().contains("10:00"));
    }
}
