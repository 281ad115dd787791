//! Availability REST API handler

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::dto::ApiResponse;
use crate::api::handlers::{error_response, AppState};
use crate::domain::DomainError;

/// Query parameters for the availability lookup
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityParams {
    /// Day, e.g. `2024-05-01` (timestamps are accepted and reduced to
    /// their calendar day)
    pub date: Option<String>,
    /// Court name
    pub court: Option<String>,
}

/// Free slots for a (day, court) pair
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    /// Canonical day, formatted YYYY-MM-DD
    pub date: String,
    pub court: String,
    /// Free slot labels in catalog order
    pub free_slots: Vec<String>,
}

/// Free slots for a day and court
///
/// Returns the slot catalog minus the slots held by active reservations.
#[utoipa::path(
    get,
    path = "/api/v1/availability",
    tag = "Availability",
    params(AvailabilityParams),
    responses(
        (status = 200, description = "Free slots in catalog order", body = ApiResponse<AvailabilityResponse>),
        (status = 400, description = "Missing or malformed date/court"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn get_availability(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<ApiResponse<AvailabilityResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let date = params
        .date
        .as_deref()
        .ok_or_else(|| error_response(DomainError::MissingParameter { field: "date" }))?;
    let court = params
        .court
        .as_deref()
        .ok_or_else(|| error_response(DomainError::MissingParameter { field: "court" }))?;

    let slots = state
        .availability
        .available_slots(date, court)
        .await
        .map_err(error_response)?;

    // re-anchor for the canonical form in the response
    let day = crate::domain::CanonicalDay::anchor(date).map_err(error_response)?;

    Ok(Json(ApiResponse::success(AvailabilityResponse {
        date: day.to_string(),
        court: court.trim().to_string(),
        free_slots: slots.into_iter().map(String::from).collect(),
    })))
}
