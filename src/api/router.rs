//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::ApiResponse;
use crate::api::handlers::{availability, courts, health, reservations, revenue, AppState};
use crate::application::services::{AvailabilityService, BookingService, RevenueService};
use crate::auth::middleware::auth_middleware;
use crate::domain::RepositoryProvider;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "user_header",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-user"))),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Availability
        availability::get_availability,
        // Reservations
        reservations::create_reservation,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::update_reservation,
        reservations::cancel_reservation,
        // Reports
        revenue::get_revenue_report,
        // Courts
        courts::list_courts,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Health
            health::HealthResponse,
            // Availability
            availability::AvailabilityResponse,
            // Reservations
            reservations::ReservationResponse,
            reservations::CreateReservationRequest,
            reservations::UpdateReservationRequest,
            // Reports
            revenue::RevenueSummaryResponse,
            // Courts
            courts::CourtResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe. No authentication."),
        (name = "Availability", description = "Free-slot lookup for a day and court. The catalog covers 16 hourly slots from 08:00 to 23:00."),
        (name = "Reservations", description = "Booking, partial updates and cancellation. A (day, court, slot) triple can be held by at most one active reservation; concurrent bookings for the same slot resolve to exactly one winner. `date` and `court_name` are frozen after creation."),
        (name = "Reports", description = "Revenue and outstanding-debt reconciliation, broken down per (day, court). Admin role required. `court` and `payment_method` accept the `ALL` wildcard."),
        (name = "Courts", description = "Court catalog with price configuration. Amounts are in the smallest currency unit."),
    ),
    info(
        title = "Courtbook API",
        version = "1.0.0",
        description = "REST API for court reservation scheduling and financial reconciliation.

## Authentication

The fronting gateway authenticates users and forwards the identity in
headers:
- `x-user` — acting user identifier (required on all `/api/v1` routes)
- `x-user-role` — `operator` (default) or `admin`

## Response format

Every response is wrapped in a standard envelope:
```json
{\"success\": true, \"data\": {...}, \"error\": null}
```

On failure:
```json
{\"success\": false, \"data\": null, \"error\": \"description\"}
```

## Dates

Days are calendar days. Endpoints accept `YYYY-MM-DD` as well as full
timestamps; a timestamp is reduced to its calendar day, so every
representation of the same day addresses the same schedule.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    availability_service: Arc<AvailabilityService>,
    booking_service: Arc<BookingService>,
    revenue_service: Arc<RevenueService>,
) -> Router {
    let state = AppState {
        availability: availability_service,
        booking: booking_service,
        revenue: revenue_service,
        repos,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // All /api/v1 routes require an authenticated identity.
    let api_routes = Router::new()
        .route("/availability", get(availability::get_availability))
        .route(
            "/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route(
            "/reservations/{id}",
            get(reservations::get_reservation)
                .put(reservations::update_reservation)
                .delete(reservations::cancel_reservation),
        )
        .route("/reports/revenue", get(revenue::get_revenue_report))
        .route("/courts", get(courts::list_courts))
        .layer(middleware::from_fn(auth_middleware))
        .with_state(state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
