//! Auth handlers — register, login, logout, renewal, session management.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use uuid::Uuid;
use validator::Validate;

use audithub_core::error::AppError;
use audithub_core::types::SessionId;
use audithub_entity::session::{Session, SessionToken};
use audithub_service::auth::RegisterUser;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, AuthResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

use super::client_meta;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (ip, user_agent) = client_meta(&headers);
    let result = state
        .auth_service
        .register(
            RegisterUser {
                name: req.name,
                email: req.email,
                password: req.password,
            },
            ip,
            user_agent,
        )
        .await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        token: result.token.token,
        expires_in_seconds: result.token.expires_in,
        user: result.user.into(),
    })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (ip, user_agent) = client_meta(&headers);
    let result = state
        .auth_service
        .login(&req.email, &req.password, ip, user_agent)
        .await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        token: result.token.token,
        expires_in_seconds: result.token.expires_in,
        user: result.user.into(),
    })))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.auth_service.logout(&auth).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Logged out successfully",
    ))))
}

/// POST /api/auth/logout-all
pub async fn logout_all(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let count = state.auth_service.logout_all(&auth).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(format!(
        "Revoked {count} sessions"
    )))))
}

/// POST /api/auth/renew
pub async fn renew(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<SessionToken>>, ApiError> {
    let token = state.auth_service.renew(&auth).await?;
    Ok(Json(ApiResponse::ok(token)))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.auth_service.profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// GET /api/auth/sessions
pub async fn sessions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Session>>>, ApiError> {
    let sessions = state.auth_service.sessions(&auth).await?;
    Ok(Json(ApiResponse::ok(sessions)))
}

/// DELETE /api/auth/sessions/{id}
pub async fn revoke_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .auth_service
        .revoke_session(&auth, SessionId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Session revoked",
    ))))
}
