//! Session storage operations wrapping the database repository.

use std::sync::Arc;

use chrono::{Duration, Utc};

use audithub_core::config::session::SessionConfig;
use audithub_core::error::AppError;
use audithub_core::types::{OrganizationId, SessionId, UserId};
use audithub_database::repositories::session::SessionRepository;
use audithub_entity::session::{CreateSession, Session};

/// Abstracts session persistence operations.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Session database repository.
    repo: Arc<SessionRepository>,
    /// Session configuration.
    config: SessionConfig,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(repo: Arc<SessionRepository>, config: SessionConfig) -> Self {
        Self { repo, config }
    }

    /// The configured session TTL in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.config.ttl_seconds
    }

    /// Creates a new session record expiring TTL from now.
    pub async fn create_session(
        &self,
        token: String,
        user_id: UserId,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<Session, AppError> {
        let expires_at = Utc::now() + Duration::seconds(self.config.ttl_seconds as i64);

        self.repo
            .create(&CreateSession {
                token,
                user_id,
                ip_address,
                user_agent,
                expires_at,
            })
            .await
    }

    /// Finds a session by its opaque token.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<Session>, AppError> {
        self.repo.find_by_token(token).await
    }

    /// Slides a session's expiry to TTL from now (sliding expiration).
    pub async fn renew(&self, session_id: SessionId) -> Result<Session, AppError> {
        let expires_at = Utc::now() + Duration::seconds(self.config.ttl_seconds as i64);
        self.repo.update_expiry(session_id, expires_at).await
    }

    /// Deletes the session holding the given token. Idempotent; returns
    /// whether a row existed.
    pub async fn revoke_by_token(&self, token: &str) -> Result<bool, AppError> {
        self.repo.delete_by_token(token).await
    }

    /// Deletes a session by ID. Idempotent.
    pub async fn revoke_by_id(&self, session_id: SessionId) -> Result<bool, AppError> {
        self.repo.delete(session_id).await
    }

    /// Deletes every session belonging to the user.
    pub async fn revoke_all(&self, user_id: UserId) -> Result<u64, AppError> {
        self.repo.delete_all_by_user(user_id).await
    }

    /// Sets or clears the session's active organization. The store enforces
    /// no policy here; callers must have verified membership already.
    pub async fn set_active_organization(
        &self,
        session_id: SessionId,
        organization_id: Option<OrganizationId>,
    ) -> Result<(), AppError> {
        self.repo
            .set_active_organization(session_id, organization_id)
            .await
    }

    /// Lists the user's unexpired sessions.
    pub async fn list_active(&self, user_id: UserId) -> Result<Vec<Session>, AppError> {
        self.repo.find_active_by_user(user_id, Utc::now()).await
    }

    /// Deletes every expired session, returning how many were removed.
    pub async fn delete_expired(&self) -> Result<u64, AppError> {
        self.repo.delete_expired(Utc::now()).await
    }
}
