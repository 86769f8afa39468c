//! Membership repository implementation.

use sqlx::PgPool;

use audithub_core::error::{AppError, ErrorKind};
use audithub_core::result::AppResult;
use audithub_core::types::pagination::{PageRequest, PageResponse};
use audithub_core::types::{MemberId, OrganizationId, UserId};
use audithub_entity::organization::{CreateMember, Member, MemberRole, Organization};

/// Repository for organization membership operations.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Create a new member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a membership by primary key.
    pub async fn find_by_id(&self, id: MemberId) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find member", e))
    }

    /// Find the membership of a user within an organization.
    pub async fn find_by_org_and_user(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>(
            "SELECT * FROM members WHERE organization_id = $1 AND user_id = $2",
        )
        .bind(organization_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find membership", e))
    }

    /// Find a membership by the member's email (case-insensitive).
    pub async fn find_by_org_and_email(
        &self,
        organization_id: OrganizationId,
        email: &str,
    ) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>(
            "SELECT m.* FROM members m JOIN users u ON u.id = m.user_id \
             WHERE m.organization_id = $1 AND LOWER(u.email) = LOWER($2)",
        )
        .bind(organization_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find member by email", e)
        })
    }

    /// Check whether a user is a member of an organization.
    pub async fn exists_by_org_and_user(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM members WHERE organization_id = $1 AND user_id = $2)",
        )
        .bind(organization_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check membership", e))?;
        Ok(exists)
    }

    /// List an organization's members with pagination.
    pub async fn list_by_org(
        &self,
        organization_id: OrganizationId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Member>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM members WHERE organization_id = $1")
                .bind(organization_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count members", e)
                })?;

        let members = sqlx::query_as::<_, Member>(
            "SELECT * FROM members WHERE organization_id = $1 \
             ORDER BY created_at ASC LIMIT $2 OFFSET $3",
        )
        .bind(organization_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list members", e))?;

        Ok(PageResponse::new(
            members,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List every organization the user belongs to.
    pub async fn list_organizations_for_user(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<Organization>> {
        sqlx::query_as::<_, Organization>(
            "SELECT o.* FROM organizations o JOIN members m ON m.organization_id = o.id \
             WHERE m.user_id = $1 ORDER BY o.created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list user organizations", e)
        })
    }

    /// Create a new membership. Fails on the unique (organization, user)
    /// constraint if the user is already a member.
    pub async fn create(&self, data: &CreateMember) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            "INSERT INTO members (organization_id, user_id, role) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.organization_id)
        .bind(data.user_id)
        .bind(&data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create member", e))
    }

    /// Change a member's role.
    pub async fn update_role(&self, id: MemberId, role: &MemberRole) -> AppResult<Member> {
        sqlx::query_as::<_, Member>("UPDATE members SET role = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(role)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update member role", e)
            })
    }

    /// Delete a membership.
    pub async fn delete(&self, id: MemberId) -> AppResult<()> {
        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete member", e)
            })?;
        Ok(())
    }
}
