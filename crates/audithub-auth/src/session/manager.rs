//! Session lifecycle manager — creation, validation, renewal, revocation.

use std::sync::Arc;

use tracing::{debug, warn};

use audithub_core::error::AppError;
use audithub_core::types::{OrganizationId, SessionId, UserId};
use audithub_database::repositories::user::UserRepository;
use audithub_entity::session::Session;
use audithub_entity::user::User;

use crate::token::TokenGenerator;

use super::store::SessionStore;

/// A session that passed validation, together with its owning user.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    /// The live session record.
    pub session: Session,
    /// The session's owner.
    pub user: User,
}

/// Manages the complete session lifecycle on top of the store.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Session persistence.
    store: Arc<SessionStore>,
    /// User repository, for the banned-user check.
    user_repo: Arc<UserRepository>,
    /// Opaque token generator.
    token_generator: TokenGenerator,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(store: Arc<SessionStore>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            store,
            user_repo,
            token_generator: TokenGenerator::new(),
        }
    }

    /// The configured session TTL in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.store.ttl_seconds()
    }

    /// Creates a new session for the user: generates a token, computes
    /// expiry, persists one durable row.
    pub async fn create_session(
        &self,
        user_id: UserId,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<Session, AppError> {
        let token = self.token_generator.generate()?;
        let session = self
            .store
            .create_session(token, user_id, ip_address, user_agent)
            .await?;

        debug!(user_id = %user_id, session_id = %session.id, "Session created");
        Ok(session)
    }

    /// Validates a token and returns the session if it is live.
    ///
    /// Returns `None` when the token does not resolve, when the session has
    /// expired (the row is left in place; the reaper removes it later), or
    /// when the owning user is banned. This triple check is the only inline
    /// authorization pre-check the core performs.
    pub async fn validate(&self, token: &str) -> Result<Option<AuthenticatedSession>, AppError> {
        if token.is_empty() {
            return Ok(None);
        }

        let Some(session) = self.store.find_by_token(token).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            debug!(session_id = %session.id, "Rejected expired session");
            return Ok(None);
        }

        let Some(user) = self.user_repo.find_by_id(session.user_id).await? else {
            warn!(session_id = %session.id, "Session owner no longer exists");
            return Ok(None);
        };

        if user.banned {
            warn!(user_id = %user.id, "Rejected session of banned user");
            return Ok(None);
        }

        Ok(Some(AuthenticatedSession { session, user }))
    }

    /// Validates a token, failing with `Unauthorized` instead of `None`.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedSession, AppError> {
        self.validate(token)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid or expired session"))
    }

    /// Extends the session's expiry from now (sliding expiration).
    pub async fn renew(&self, token: &str) -> Result<Session, AppError> {
        let auth = self.authenticate(token).await?;
        self.store.renew(auth.session.id).await
    }

    /// Revokes the session holding the given token (logout). Idempotent;
    /// revoking an unknown token is a no-op.
    pub async fn revoke(&self, token: &str) -> Result<(), AppError> {
        let existed = self.store.revoke_by_token(token).await?;
        if existed {
            debug!("Session revoked");
        }
        Ok(())
    }

    /// Revokes every session belonging to the user (logout everywhere).
    pub async fn revoke_all(&self, user_id: UserId) -> Result<u64, AppError> {
        let count = self.store.revoke_all(user_id).await?;
        debug!(user_id = %user_id, count, "Revoked all sessions");
        Ok(count)
    }

    /// Sets or clears the session's active organization. Membership policy
    /// is the caller's responsibility (see the organization service).
    pub async fn set_active_organization(
        &self,
        token: &str,
        organization_id: Option<OrganizationId>,
    ) -> Result<(), AppError> {
        let auth = self.authenticate(token).await?;
        self.store
            .set_active_organization(auth.session.id, organization_id)
            .await
    }

    /// Lists the user's live sessions.
    pub async fn list_active(&self, user_id: UserId) -> Result<Vec<Session>, AppError> {
        self.store.list_active(user_id).await
    }

    /// Revokes one of the user's own sessions by ID. Fails with `NotFound`
    /// when the session does not belong to the user.
    pub async fn revoke_own(
        &self,
        user_id: UserId,
        session_id: SessionId,
    ) -> Result<(), AppError> {
        let sessions = self.store.list_active(user_id).await?;
        let session = sessions
            .into_iter()
            .find(|s| s.id == session_id)
            .ok_or_else(|| AppError::not_found("Session not found"))?;

        self.store.revoke_by_id(session.id).await?;
        Ok(())
    }
}
