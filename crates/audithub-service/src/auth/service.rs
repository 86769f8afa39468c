//! Login, registration, and session management flows.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use audithub_auth::password::{PasswordHasher, PasswordValidator};
use audithub_auth::session::SessionManager;
use audithub_core::error::AppError;
use audithub_core::types::SessionId;
use audithub_database::repositories::user::UserRepository;
use audithub_entity::session::{Session, SessionToken};
use audithub_entity::user::{CreateUser, User};

use crate::context::RequestContext;

/// Result of a successful login or registration.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// The issued opaque token and its TTL. The edge collaborator sets the
    /// cookie from this.
    pub token: SessionToken,
    /// The authenticated user.
    pub user: User,
}

/// Data required to register a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    /// Full display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password, validated and hashed before storage.
    pub password: String,
}

/// Authentication flows: register, login, logout, and session management.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Session lifecycle manager.
    sessions: Arc<SessionManager>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    password_policy: PasswordValidator,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        sessions: Arc<SessionManager>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            user_repo,
            sessions,
            hasher,
            password_policy: PasswordValidator::new(),
        }
    }

    /// Registers a new user and opens their first session.
    pub async fn register(
        &self,
        data: RegisterUser,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<LoginResult, AppError> {
        if self.user_repo.exists_by_email(&data.email).await? {
            return Err(AppError::conflict("Email is already registered"));
        }

        self.password_policy.validate(&data.password)?;
        let password_hash = self.hasher.hash_password(&data.password)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                name: data.name,
                email: data.email,
                password_hash,
            })
            .await?;

        let session = self
            .sessions
            .create_session(user.id, ip_address, user_agent)
            .await?;

        info!(user_id = %user.id, "User registered");

        Ok(self.issued(session, user))
    }

    /// Authenticates credentials and opens a session.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<LoginResult, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if user.banned {
            return Err(AppError::forbidden("Account is banned"));
        }

        let valid = self
            .hasher
            .verify_password(password, &user.password_hash)?;
        if !valid {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let session = self
            .sessions
            .create_session(user.id, ip_address, user_agent)
            .await?;

        info!(user_id = %user.id, session_id = %session.id, "Login successful");

        Ok(self.issued(session, user))
    }

    /// Revokes the current session (logout). Idempotent.
    pub async fn logout(&self, ctx: &RequestContext) -> Result<(), AppError> {
        self.sessions.revoke(&ctx.session_token).await
    }

    /// Revokes every session of the current user (logout on all devices).
    pub async fn logout_all(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        self.sessions.revoke_all(ctx.user_id).await
    }

    /// Slides the current session's expiry and returns the refreshed token.
    pub async fn renew(&self, ctx: &RequestContext) -> Result<SessionToken, AppError> {
        let session = self.sessions.renew(&ctx.session_token).await?;
        Ok(SessionToken {
            token: session.token.clone(),
            expires_in: session.remaining_seconds() as u64,
        })
    }

    /// Lists the current user's live sessions.
    pub async fn sessions(&self, ctx: &RequestContext) -> Result<Vec<Session>, AppError> {
        self.sessions.list_active(ctx.user_id).await
    }

    /// Revokes one of the current user's sessions by ID.
    pub async fn revoke_session(
        &self,
        ctx: &RequestContext,
        session_id: SessionId,
    ) -> Result<(), AppError> {
        self.sessions.revoke_own(ctx.user_id, session_id).await
    }

    /// Returns the current user's profile.
    pub async fn profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    fn issued(&self, session: Session, user: User) -> LoginResult {
        LoginResult {
            token: SessionToken {
                token: session.token,
                expires_in: self.sessions.ttl_seconds(),
            },
            user,
        }
    }
}
