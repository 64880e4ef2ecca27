use axum::http::{header, HeaderMap};
use service_core::error::AppError;

/// Bearer token from the `Authorization` header.
///
/// Only the exact `Bearer ` scheme prefix is accepted, and the token must be non-empty.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Missing or invalid Authorization header".to_string()))
}
