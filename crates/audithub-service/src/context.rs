//! Request context carrying the authenticated user and session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use audithub_auth::session::AuthenticatedSession;
use audithub_core::error::AppError;
use audithub_core::types::{OrganizationId, SessionId, UserId};

/// Context for the current authenticated request.
///
/// Built by the API layer after session validation and passed into service
/// methods so that every operation knows *who* is acting, from *which*
/// session, and in *which* organization scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The current session ID.
    pub session_id: SessionId,
    /// The raw session token. A bearer secret; needed for operations keyed
    /// by token (logout, renewal, organization switch).
    #[serde(skip_serializing)]
    pub session_token: String,
    /// The user's email.
    pub email: String,
    /// The user's display name.
    pub name: String,
    /// The organization this session is scoped to, if any.
    pub active_organization_id: Option<OrganizationId>,
    /// IP address of the request origin.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Builds a context from a validated session.
    pub fn from_session(
        auth: AuthenticatedSession,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            user_id: auth.user.id,
            session_id: auth.session.id,
            session_token: auth.session.token,
            email: auth.user.email,
            name: auth.user.name,
            active_organization_id: auth.session.active_organization_id,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// The active organization, or `Unauthorized` when the session is not
    /// scoped to one.
    pub fn require_active_organization(&self) -> Result<OrganizationId, AppError> {
        self.active_organization_id
            .ok_or_else(|| AppError::unauthorized("No active organization selected"))
    }
}
