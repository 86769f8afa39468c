//! Invitation repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use audithub_core::error::{AppError, ErrorKind};
use audithub_core::result::AppResult;
use audithub_core::types::{InvitationId, OrganizationId};
use audithub_entity::organization::{
    CreateInvitation, CreateMember, Invitation, InvitationStatus, Member,
};

/// Repository for invitation persistence and state transitions.
#[derive(Debug, Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Create a new invitation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an invitation by primary key.
    pub async fn find_by_id(&self, id: InvitationId) -> AppResult<Option<Invitation>> {
        sqlx::query_as::<_, Invitation>("SELECT * FROM invitations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find invitation", e))
    }

    /// Find the pending invitation for an (organization, email) pair, if any.
    pub async fn find_pending_by_org_and_email(
        &self,
        organization_id: OrganizationId,
        email: &str,
    ) -> AppResult<Option<Invitation>> {
        sqlx::query_as::<_, Invitation>(
            "SELECT * FROM invitations WHERE organization_id = $1 \
             AND LOWER(email) = LOWER($2) AND status = 'pending'",
        )
        .bind(organization_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find pending invitation", e)
        })
    }

    /// List every invitation sent by an organization, newest first.
    pub async fn list_by_org(&self, organization_id: OrganizationId) -> AppResult<Vec<Invitation>> {
        sqlx::query_as::<_, Invitation>(
            "SELECT * FROM invitations WHERE organization_id = $1 ORDER BY created_at DESC",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list invitations", e))
    }

    /// List an organization's pending invitations.
    pub async fn list_pending_by_org(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<Invitation>> {
        sqlx::query_as::<_, Invitation>(
            "SELECT * FROM invitations WHERE organization_id = $1 AND status = 'pending' \
             ORDER BY created_at DESC",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list pending invitations", e)
        })
    }

    /// List the still-valid pending invitations addressed to an email.
    pub async fn list_pending_valid_by_email(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<Invitation>> {
        sqlx::query_as::<_, Invitation>(
            "SELECT * FROM invitations WHERE LOWER(email) = LOWER($1) \
             AND status = 'pending' AND expires_at > $2 ORDER BY created_at DESC",
        )
        .bind(email)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list invitations by email", e)
        })
    }

    /// Create a new pending invitation.
    pub async fn create(&self, data: &CreateInvitation) -> AppResult<Invitation> {
        sqlx::query_as::<_, Invitation>(
            "INSERT INTO invitations (email, organization_id, inviter_id, role, status, expires_at) \
             VALUES ($1, $2, $3, $4, 'pending', $5) RETURNING *",
        )
        .bind(&data.email)
        .bind(data.organization_id)
        .bind(data.inviter_id)
        .bind(&data.role)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create invitation", e))
    }

    /// Move an invitation to a new status.
    pub async fn update_status(
        &self,
        id: InvitationId,
        status: InvitationStatus,
    ) -> AppResult<Invitation> {
        sqlx::query_as::<_, Invitation>(
            "UPDATE invitations SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update invitation status", e)
        })
    }

    /// Extend a pending invitation's expiry (resend). Status is untouched.
    pub async fn extend_expiry(
        &self,
        id: InvitationId,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Invitation> {
        sqlx::query_as::<_, Invitation>(
            "UPDATE invitations SET expires_at = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to extend invitation", e)
        })
    }

    /// Accept an invitation: create the membership and flip the status to
    /// accepted in one transaction. The unique (organization, user)
    /// constraint makes a concurrent double-accept fail here rather than
    /// double-create.
    pub async fn accept(&self, id: InvitationId, member: &CreateMember) -> AppResult<Member> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let created = sqlx::query_as::<_, Member>(
            "INSERT INTO members (organization_id, user_id, role) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(member.organization_id)
        .bind(member.user_id)
        .bind(&member.role)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create member", e))?;

        sqlx::query("UPDATE invitations SET status = 'accepted' WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to accept invitation", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit invitation accept", e)
        })?;

        Ok(created)
    }
}
