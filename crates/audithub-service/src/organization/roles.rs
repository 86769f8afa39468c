//! Dynamic role management.

use std::sync::Arc;

use tracing::info;

use audithub_core::error::AppError;
use audithub_core::types::OrganizationId;
use audithub_database::repositories::member::MemberRepository;
use audithub_database::repositories::org_role::OrgRoleRepository;
use audithub_entity::organization::{CreateOrgRole, OrgRole, RolePermissions, UpdateOrgRole};

use crate::context::RequestContext;

use super::access::RoleGuard;
use super::selector::RoleSelector;

/// Organization-defined roles with custom permission documents.
#[derive(Debug, Clone)]
pub struct RoleService {
    /// Dynamic role repository.
    role_repo: Arc<OrgRoleRepository>,
    /// Role guard.
    guard: RoleGuard,
}

impl RoleService {
    /// Creates a new role service.
    pub fn new(role_repo: Arc<OrgRoleRepository>, member_repo: Arc<MemberRepository>) -> Self {
        Self {
            role_repo,
            guard: RoleGuard::new(member_repo),
        }
    }

    /// Creates a dynamic role. Owner or admin only. The permission document
    /// must parse as `{"resource": ["action", ...]}`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
        name: &str,
        permissions: &str,
    ) -> Result<OrgRole, AppError> {
        self.guard
            .require_owner_or_admin(organization_id, ctx.user_id)
            .await?;

        RolePermissions::parse(permissions)?;

        if self
            .role_repo
            .exists_by_org_and_name(organization_id, name)
            .await?
        {
            return Err(AppError::conflict(
                "A role with this name already exists in the organization",
            ));
        }

        let role = self
            .role_repo
            .create(&CreateOrgRole {
                organization_id,
                name: name.to_string(),
                permissions: permissions.to_string(),
            })
            .await?;

        info!(
            organization_id = %organization_id,
            role = %role.name,
            created_by = %ctx.user_id,
            "Dynamic role created"
        );

        Ok(role)
    }

    /// Updates a dynamic role. Owner or admin only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
        selector: &RoleSelector,
        data: UpdateOrgRole,
    ) -> Result<OrgRole, AppError> {
        self.guard
            .require_owner_or_admin(organization_id, ctx.user_id)
            .await?;

        let mut role = self.resolve(organization_id, selector).await?;

        if let Some(name) = data.name {
            if name != role.name {
                if self
                    .role_repo
                    .exists_by_org_and_name(organization_id, &name)
                    .await?
                {
                    return Err(AppError::conflict(
                        "A role with this name already exists in the organization",
                    ));
                }
                role.name = name;
            }
        }
        if let Some(permissions) = data.permissions {
            RolePermissions::parse(&permissions)?;
            role.permissions = permissions;
        }

        self.role_repo.update(&role).await
    }

    /// Deletes a dynamic role. Owner or admin only.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
        selector: &RoleSelector,
    ) -> Result<(), AppError> {
        self.guard
            .require_owner_or_admin(organization_id, ctx.user_id)
            .await?;

        let role = self.resolve(organization_id, selector).await?;
        self.role_repo.delete(role.id).await
    }

    /// Lists an organization's dynamic roles. Members only.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
    ) -> Result<Vec<OrgRole>, AppError> {
        self.guard
            .require_member(organization_id, ctx.user_id)
            .await?;
        self.role_repo.list_by_org(organization_id).await
    }

    /// Fetches a dynamic role by id or name. Members only.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
        selector: &RoleSelector,
    ) -> Result<OrgRole, AppError> {
        self.guard
            .require_member(organization_id, ctx.user_id)
            .await?;
        self.resolve(organization_id, selector).await
    }

    /// Resolves a role by id or name within an organization.
    async fn resolve(
        &self,
        organization_id: OrganizationId,
        selector: &RoleSelector,
    ) -> Result<OrgRole, AppError> {
        let role = match selector {
            RoleSelector::ById(id) => self.role_repo.find_by_id(*id).await?,
            RoleSelector::ByName(name) => {
                self.role_repo
                    .find_by_org_and_name(organization_id, name)
                    .await?
            }
        };

        role.filter(|r| r.organization_id == organization_id)
            .ok_or_else(|| AppError::not_found("Role not found"))
    }
}
