//! Revenue report REST API handler

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::dto::ApiResponse;
use crate::api::handlers::{error_response, AppState};
use crate::application::services::{RevenueQuery, RevenueSummary};
use crate::auth::AuthContext;
use crate::domain::DomainError;

/// Query parameters for the revenue report
#[derive(Debug, Deserialize, IntoParams)]
pub struct RevenueParams {
    /// First day of the range, e.g. `2024-05-01`
    pub from: Option<String>,
    /// Last day (inclusive); defaults to `from`
    pub to: Option<String>,
    /// Court name or `ALL`
    pub court: Option<String>,
    /// Payment method tag or `ALL`
    pub payment_method: Option<String>,
    /// Optional restriction: `FULL`, `DEPOSIT` or `UNPAID`
    pub payment_state: Option<String>,
}

/// One row of the revenue report
///
/// Amounts are in the smallest currency unit.
#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueSummaryResponse {
    /// Canonical day, formatted YYYY-MM-DD
    pub day: String,
    pub court_name: String,
    /// Sum of full amounts charged in the group
    pub consolidated_full_amount: i64,
    /// Sum of deposit amounts charged in the group
    pub consolidated_deposit_amount: i64,
    /// Shortfall between the expected full price and what was collected
    pub outstanding_debt: i64,
}

impl From<RevenueSummary> for RevenueSummaryResponse {
    fn from(s: RevenueSummary) -> Self {
        Self {
            day: s.day,
            court_name: s.court_name,
            consolidated_full_amount: s.consolidated_full_amount,
            consolidated_deposit_amount: s.consolidated_deposit_amount,
            outstanding_debt: s.outstanding_debt,
        }
    }
}

/// Revenue and outstanding-debt report
///
/// Admin only. `court` and `payment_method` accept the `ALL` wildcard;
/// the output is always broken down per (day, court).
#[utoipa::path(
    get,
    path = "/api/v1/reports/revenue",
    tag = "Reports",
    params(RevenueParams),
    responses(
        (status = 200, description = "Per-(day, court) revenue rows", body = ApiResponse<Vec<RevenueSummaryResponse>>),
        (status = 400, description = "Missing or malformed parameters"),
        (status = 403, description = "Caller lacks the admin role"),
        (status = 404, description = "No reservations match the filters"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn get_revenue_report(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(params): Query<RevenueParams>,
) -> Result<Json<ApiResponse<Vec<RevenueSummaryResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let from = params
        .from
        .ok_or_else(|| error_response(DomainError::MissingParameter { field: "from" }))?;
    let court = params
        .court
        .ok_or_else(|| error_response(DomainError::MissingParameter { field: "court" }))?;
    let payment_method = params
        .payment_method
        .ok_or_else(|| error_response(DomainError::MissingParameter { field: "payment_method" }))?;

    let query = RevenueQuery {
        from,
        to: params.to,
        court_name: court,
        payment_method,
        payment_state: params.payment_state,
    };

    let rows = state
        .revenue
        .summarize(&ctx, query)
        .await
        .map_err(error_response)?;

    let responses: Vec<RevenueSummaryResponse> = rows.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}
