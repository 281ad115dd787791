//! Authentication middleware for Axum
//!
//! Token verification is handled by the fronting gateway; this service
//! receives the already-authenticated identity in headers and turns it
//! into a request-scoped [`AuthContext`] extension. Requests without an
//! identity header are rejected.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::context::{AuthContext, UserRole};

/// Header carrying the acting user's identifier
pub const USER_HEADER: &str = "x-user";
/// Header carrying the acting user's role (`operator` | `admin`)
pub const ROLE_HEADER: &str = "x-user-role";

/// Build the per-request `AuthContext` from identity headers.
pub async fn auth_middleware(mut request: Request<Body>, next: Next) -> Response {
    let user = request
        .headers()
        .get(USER_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(String::from);

    let Some(user) = user else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "success": false,
                "error": format!("Missing {} header", USER_HEADER),
            })),
        )
            .into_response();
    };

    let role = request
        .headers()
        .get(ROLE_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(UserRole::from_str)
        .unwrap_or(UserRole::Operator);

    request
        .extensions_mut()
        .insert(AuthContext::new(user, role));

    next.run(request).await
}
