//! Session extractors — pull the opaque token from the request, validate it
//! against the store, and inject the request context.
//!
//! [`MaybeAuthUser`] is the fail-open boundary: an internal failure during
//! validation is logged and the request continues unauthenticated. Every
//! downstream mutating operation re-checks authorization independently, so
//! this never widens access.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use tracing::error;

use audithub_core::error::AppError;
use audithub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Cookie holding the session token.
pub const SESSION_COOKIE_NAME: &str = "session_token";
/// Authorization scheme prefix.
const BEARER_PREFIX: &str = "Bearer ";

/// Optional authenticated context. Present only when a token was supplied
/// and resolved to a live session.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<RequestContext>);

/// Required authenticated context. Rejects with 401 when absent.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Extracts the candidate token: `Authorization: Bearer` wins over the
/// `session_token` cookie.
fn extract_token(parts: &Parts) -> Option<String> {
    if let Some(value) = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = value.strip_prefix(BEARER_PREFIX) {
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    for value in parts.headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((name, token)) = pair.trim().split_once('=') {
                if name == SESSION_COOKIE_NAME && !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

fn client_ip(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim().to_string())
}

fn user_agent(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_token(parts) else {
            return Ok(Self(None));
        };

        match state.session_manager.validate(&token).await {
            Ok(Some(auth)) => {
                let ctx = RequestContext::from_session(auth, client_ip(parts), user_agent(parts));
                Ok(Self(Some(ctx)))
            }
            Ok(None) => Ok(Self(None)),
            Err(e) => {
                error!(error = %e, "Session validation failed; continuing unauthenticated");
                Ok(Self(None))
            }
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(MaybeAuthUser(ctx)) = MaybeAuthUser::from_request_parts(parts, state).await;

        ctx.map(AuthUser)
            .ok_or_else(|| ApiError(AppError::unauthorized("Missing or invalid session")))
    }
}
