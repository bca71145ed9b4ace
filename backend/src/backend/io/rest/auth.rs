//! Admin authorization policy for the REST surface.
//!
//! Mock scheme: guarded endpoints expect the fixed bearer token issued by
//! the admin login endpoint. There is no expiry and no per-admin secret;
//! the policy lives entirely at this boundary and the domain layer never
//! sees tokens.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use log::warn;

use shared::MessageResponse;

/// Token issued by the admin login endpoint and expected by the guard
pub const ADMIN_TOKEN: &str = "1234-admin-token";

/// Whether an Authorization header value carries the admin token.
pub fn is_authorized(header_value: Option<&str>) -> bool {
    match header_value {
        Some(value) => match value.strip_prefix("Bearer ") {
            Some(token) => token.trim() == ADMIN_TOKEN,
            None => false,
        },
        None => false,
    }
}

/// Reject requests that do not carry the admin token.
pub async fn require_admin(req: Request, next: Next) -> Response {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if !is_authorized(header_value) {
        warn!("Rejected unauthorized request to {}", req.uri().path());
        return (
            StatusCode::UNAUTHORIZED,
            Json(MessageResponse {
                message: "Not authorized, admin access only".to_string(),
            }),
        )
            .into_response();
    }

    next.run(req).await
}
