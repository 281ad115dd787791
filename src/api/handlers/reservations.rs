//! Reservation REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::handlers::{error_response, AppState};
use crate::application::services::{NewReservation, ReservationPatch};
use crate::auth::AuthContext;
use crate::domain::{DomainError, Reservation};

/// A reservation as returned by the API
///
/// Amounts are in the smallest currency unit.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationResponse {
    pub id: String,
    /// Canonical day, formatted YYYY-MM-DD
    pub date: String,
    pub court_name: String,
    /// Slot label, e.g. `10:00`
    pub slot: String,
    pub client_ref: String,
    /// `FULL`, `DEPOSIT` or `UNPAID`
    pub payment_state: String,
    pub payment_method: String,
    pub full_amount_charged: i64,
    pub deposit_amount_charged: i64,
    /// `Active` or `Cancelled`
    pub status: String,
    pub created_by: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            date: r.day.to_string(),
            court_name: r.court_name,
            slot: r.slot,
            client_ref: r.client_ref,
            payment_state: r.payment_state.as_str().to_string(),
            payment_method: r.payment_method,
            full_amount_charged: r.full_amount_charged,
            deposit_amount_charged: r.deposit_amount_charged,
            status: r.status.as_str().to_string(),
            created_by: r.created_by,
            note: r.note,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Request to book a slot
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    /// Day, e.g. `2024-05-01`
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    /// Court name
    #[validate(length(min = 1, max = 100, message = "court name is required"))]
    pub court_name: String,
    /// Slot label from the catalog, e.g. `10:00`
    #[validate(length(min = 1, max = 5, message = "slot label is required"))]
    pub slot: String,
    /// External client reference
    #[validate(length(min = 1, max = 100, message = "client reference is required"))]
    pub client_ref: String,
    /// `FULL`, `DEPOSIT` or `UNPAID`
    pub payment_state: String,
    /// Payment method tag, e.g. `card`, `cash`
    pub payment_method: String,
    /// Optional free-form note
    #[validate(length(max = 500, message = "note is too long"))]
    pub note: Option<String>,
}

/// Partial update for a reservation
///
/// Pass only the fields to change. `date` and `court_name` are frozen
/// after creation and are rejected with 422 if present.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReservationRequest {
    pub date: Option<String>,
    pub court_name: Option<String>,
    pub slot: Option<String>,
    pub client_ref: Option<String>,
    pub payment_state: Option<String>,
    pub payment_method: Option<String>,
    #[validate(length(max = 500, message = "note is too long"))]
    pub note: Option<String>,
}

/// Query parameters for the day listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListReservationsParams {
    /// Day to list, e.g. `2024-05-01`
    pub date: Option<String>,
    /// Optional court restriction
    pub court: Option<String>,
}

/// Book a slot
///
/// Exactly one of several concurrent requests for the same
/// (day, court, slot) succeeds; the rest get 409.
#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ApiResponse<ReservationResponse>),
        (status = 400, description = "Missing or malformed fields"),
        (status = 404, description = "Unknown court or client"),
        (status = 409, description = "Slot already taken"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationResponse>>), (StatusCode, Json<ApiResponse<()>>)>
{
    req.validate()
        .map_err(|e| error_response(DomainError::Validation(e.to_string())))?;

    let input = NewReservation {
        date: req.date,
        court_name: req.court_name,
        slot: req.slot,
        client_ref: req.client_ref,
        payment_state: req.payment_state,
        payment_method: req.payment_method,
        note: req.note,
    };

    let reservation = state
        .booking
        .create(&ctx, input)
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(reservation.into())),
    ))
}

/// Active reservations for a day
#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(ListReservationsParams),
    responses(
        (status = 200, description = "Reservations ordered by court and slot", body = ApiResponse<Vec<ReservationResponse>>),
        (status = 400, description = "Missing or malformed date"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(params): Query<ListReservationsParams>,
) -> Result<Json<ApiResponse<Vec<ReservationResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let date = params
        .date
        .as_deref()
        .ok_or_else(|| error_response(DomainError::MissingParameter { field: "date" }))?;

    let reservations = state
        .booking
        .list_for_day(date, params.court.as_deref())
        .await
        .map_err(error_response)?;

    let responses: Vec<ReservationResponse> = reservations.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

/// Reservation by ID
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(
        ("id" = String, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationResponse>),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let reservation = state.booking.get(&id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

/// Update a reservation
///
/// Partial update; `date` and `court_name` cannot change. A payment-state
/// change recomputes both charged amounts from the court's current prices.
#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(
        ("id" = String, Path, description = "Reservation ID")
    ),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Reservation updated", body = ApiResponse<ReservationResponse>),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Target slot already taken"),
        (status = 422, description = "Attempt to change a frozen field")
    )
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(req): Json<UpdateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    req.validate()
        .map_err(|e| error_response(DomainError::Validation(e.to_string())))?;

    let patch = ReservationPatch {
        date: req.date,
        court_name: req.court_name,
        slot: req.slot,
        client_ref: req.client_ref,
        payment_state: req.payment_state,
        payment_method: req.payment_method,
        note: req.note,
    };

    let reservation = state
        .booking
        .update(&ctx, &id, patch)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(reservation.into())))
}

/// Cancel a reservation
///
/// Frees the slot for rebooking. Cancelling twice is a no-op.
#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(
        ("id" = String, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation cancelled", body = ApiResponse<String>),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .booking
        .cancel(&ctx, &id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success("Reservation cancelled".to_string())))
}
