//! Organization repository implementation.

use sqlx::PgPool;

use audithub_core::error::{AppError, ErrorKind};
use audithub_core::result::AppResult;
use audithub_core::types::OrganizationId;
use audithub_entity::organization::{CreateOrganization, Organization};

/// Repository for organization CRUD operations.
#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    /// Create a new organization repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an organization by primary key.
    pub async fn find_by_id(&self, id: OrganizationId) -> AppResult<Option<Organization>> {
        sqlx::query_as::<_, Organization>("SELECT * FROM organizations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find organization", e)
            })
    }

    /// Find an organization by its slug.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Organization>> {
        sqlx::query_as::<_, Organization>("SELECT * FROM organizations WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find organization by slug", e)
            })
    }

    /// Check whether a slug is already taken.
    pub async fn exists_by_slug(&self, slug: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM organizations WHERE slug = $1)")
                .bind(slug)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to check slug", e)
                })?;
        Ok(exists)
    }

    /// Create a new organization.
    pub async fn create(&self, data: &CreateOrganization) -> AppResult<Organization> {
        sqlx::query_as::<_, Organization>(
            "INSERT INTO organizations (name, slug, logo, metadata) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.logo)
        .bind(&data.metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create organization", e))
    }

    /// Persist an updated organization.
    pub async fn update(&self, organization: &Organization) -> AppResult<Organization> {
        sqlx::query_as::<_, Organization>(
            "UPDATE organizations SET name = $2, slug = $3, logo = $4, metadata = $5 \
             WHERE id = $1 RETURNING *",
        )
        .bind(organization.id)
        .bind(&organization.name)
        .bind(&organization.slug)
        .bind(&organization.logo)
        .bind(&organization.metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update organization", e))
    }

    /// Delete an organization and everything it owns.
    ///
    /// Children are removed first inside a single transaction: dynamic
    /// roles, invitations, memberships, then the organization row itself.
    /// Sessions scoped to the organization fall back to no active
    /// organization.
    pub async fn delete_cascade(&self, id: OrganizationId) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("UPDATE sessions SET active_organization_id = NULL WHERE active_organization_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to detach sessions", e)
            })?;

        sqlx::query("DELETE FROM organization_roles WHERE organization_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete roles", e))?;

        sqlx::query("DELETE FROM invitations WHERE organization_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete invitations", e)
            })?;

        sqlx::query("DELETE FROM members WHERE organization_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete members", e)
            })?;

        sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete organization", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit organization delete", e)
        })
    }
}
