//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use audithub_core::types::{OrganizationId, SessionId, UserId};

/// A persisted authentication session.
///
/// Sessions are created on login or registration and destroyed on logout,
/// bulk logout, or the expiry sweep. Expiry is checked lazily on every
/// lookup, so a row may outlive its validity until the next sweep.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: SessionId,
    /// The opaque bearer token. Never serialized; validity requires a
    /// server-side lookup, the string carries no claims.
    #[serde(skip_serializing)]
    pub token: String,
    /// The user this session belongs to.
    pub user_id: UserId,
    /// The organization this session is currently scoped to, if any.
    pub active_organization_id: Option<OrganizationId>,
    /// IP address from which the session was created.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// The actor impersonating the session owner, if any.
    pub impersonated_by: Option<UserId>,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check whether the session has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Seconds until expiry, clamped at zero.
    pub fn remaining_seconds(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}

/// Data required to create a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    /// The generated opaque token.
    pub token: String,
    /// The user this session belongs to.
    pub user_id: UserId,
    /// IP address of the client.
    pub ip_address: Option<String>,
    /// User-Agent header.
    pub user_agent: Option<String>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_at: DateTime<Utc>) -> Session {
        Session {
            id: SessionId::new(),
            token: "t".to_string(),
            user_id: UserId::new(),
            active_organization_id: None,
            ip_address: None,
            user_agent: None,
            impersonated_by: None,
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn test_expiry_is_lazy_on_the_row() {
        // The row exists either way; only the predicate changes.
        let live = session(Utc::now() + Duration::hours(1));
        let dead = session(Utc::now() - Duration::seconds(1));
        assert!(!live.is_expired());
        assert!(dead.is_expired());
    }

    #[test]
    fn test_remaining_seconds_clamped() {
        let dead = session(Utc::now() - Duration::hours(1));
        assert_eq!(dead.remaining_seconds(), 0);
        let live = session(Utc::now() + Duration::seconds(90));
        assert!(live.remaining_seconds() > 80);
    }

    #[test]
    fn test_token_not_serialized() {
        let s = session(Utc::now());
        let json = serde_json::to_value(&s).expect("serialize");
        assert!(json.get("token").is_none());
        assert!(json.get("user_id").is_some());
    }
}
