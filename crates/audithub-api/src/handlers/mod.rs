//! HTTP handlers.

pub mod auth;
pub mod health;
pub mod organization;

use axum::http::HeaderMap;

/// Client metadata forwarded to session creation: (ip, user-agent).
pub(crate) fn client_meta(headers: &HeaderMap) -> (Option<String>, Option<String>) {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim().to_string());

    let user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    (ip, user_agent)
}
