//! Court catalog REST API handler

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::ApiResponse;
use crate::api::handlers::{error_response, AppState};
use crate::domain::CourtPriceConfig;

/// A court and its price configuration
///
/// Amounts are in the smallest currency unit.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourtResponse {
    pub id: i32,
    pub court_name: String,
    /// Full-session price
    pub full_amount: i64,
    /// Deposit price
    pub deposit_amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CourtPriceConfig> for CourtResponse {
    fn from(c: CourtPriceConfig) -> Self {
        Self {
            id: c.id,
            court_name: c.court_name,
            full_amount: c.full_amount,
            deposit_amount: c.deposit_amount,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Active courts and their prices
#[utoipa::path(
    get,
    path = "/api/v1/courts",
    tag = "Courts",
    responses(
        (status = 200, description = "Active courts ordered by name", body = ApiResponse<Vec<CourtResponse>>),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn list_courts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CourtResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let courts = state
        .repos
        .courts()
        .list_active()
        .await
        .map_err(error_response)?;
    let responses: Vec<CourtResponse> = courts.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}
