//! Dynamic organization role repository implementation.

use sqlx::PgPool;

use audithub_core::error::{AppError, ErrorKind};
use audithub_core::result::AppResult;
use audithub_core::types::{OrgRoleId, OrganizationId};
use audithub_entity::organization::{CreateOrgRole, OrgRole};

/// Repository for organization-defined roles.
#[derive(Debug, Clone)]
pub struct OrgRoleRepository {
    pool: PgPool,
}

impl OrgRoleRepository {
    /// Create a new organization role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a role by primary key.
    pub async fn find_by_id(&self, id: OrgRoleId) -> AppResult<Option<OrgRole>> {
        sqlx::query_as::<_, OrgRole>("SELECT * FROM organization_roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find role", e))
    }

    /// Find a role by name within an organization.
    pub async fn find_by_org_and_name(
        &self,
        organization_id: OrganizationId,
        name: &str,
    ) -> AppResult<Option<OrgRole>> {
        sqlx::query_as::<_, OrgRole>(
            "SELECT * FROM organization_roles WHERE organization_id = $1 AND name = $2",
        )
        .bind(organization_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find role by name", e))
    }

    /// Check whether a role name exists within an organization.
    pub async fn exists_by_org_and_name(
        &self,
        organization_id: OrganizationId,
        name: &str,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM organization_roles \
             WHERE organization_id = $1 AND name = $2)",
        )
        .bind(organization_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check role name", e))?;
        Ok(exists)
    }

    /// List an organization's roles.
    pub async fn list_by_org(&self, organization_id: OrganizationId) -> AppResult<Vec<OrgRole>> {
        sqlx::query_as::<_, OrgRole>(
            "SELECT * FROM organization_roles WHERE organization_id = $1 ORDER BY name ASC",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list roles", e))
    }

    /// Create a new dynamic role.
    pub async fn create(&self, data: &CreateOrgRole) -> AppResult<OrgRole> {
        sqlx::query_as::<_, OrgRole>(
            "INSERT INTO organization_roles (organization_id, name, permissions) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.organization_id)
        .bind(&data.name)
        .bind(&data.permissions)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create role", e))
    }

    /// Persist an updated role.
    pub async fn update(&self, role: &OrgRole) -> AppResult<OrgRole> {
        sqlx::query_as::<_, OrgRole>(
            "UPDATE organization_roles SET name = $2, permissions = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(role.id)
        .bind(&role.name)
        .bind(&role.permissions)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update role", e))
    }

    /// Delete a role.
    pub async fn delete(&self, id: OrgRoleId) -> AppResult<()> {
        sqlx::query("DELETE FROM organization_roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete role", e))?;
        Ok(())
    }
}
