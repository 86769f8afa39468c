//! Response body DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use audithub_core::types::UserId;
use audithub_entity::user::User;

/// Generic success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always true on this path; errors use `ApiErrorResponse`.
    pub success: bool,
    /// The payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Plain message payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Build a message payload.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Payload returned on login and registration. The collaborator at the edge
/// sets the session cookie from `token` and `expires_in_seconds`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The opaque bearer token.
    pub token: String,
    /// Token TTL in seconds.
    pub expires_in_seconds: u64,
    /// The authenticated user.
    pub user: UserResponse,
}

/// Result of a slug availability check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlugAvailabilityResponse {
    /// Whether the slug is free.
    pub available: bool,
}

/// Result of a permission check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionCheckResponse {
    /// Whether the caller may perform the action.
    pub allowed: bool,
}
