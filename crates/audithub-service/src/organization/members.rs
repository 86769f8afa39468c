//! Membership management and the permission check.

use std::sync::Arc;

use tracing::{info, warn};

use audithub_core::error::AppError;
use audithub_core::types::pagination::{PageRequest, PageResponse};
use audithub_core::types::{MemberId, OrganizationId, UserId};
use audithub_database::repositories::member::MemberRepository;
use audithub_database::repositories::org_role::OrgRoleRepository;
use audithub_database::repositories::user::UserRepository;
use audithub_entity::organization::{CreateMember, Member, MemberRole};

use crate::context::RequestContext;

use super::access::RoleGuard;
use super::permission;
use super::selector::MemberSelector;

/// Membership listing, removal, role changes, and the permission check.
#[derive(Debug, Clone)]
pub struct MembershipService {
    /// Membership repository.
    member_repo: Arc<MemberRepository>,
    /// User repository (for direct adds).
    user_repo: Arc<UserRepository>,
    /// Dynamic role repository (for permission documents).
    role_repo: Arc<OrgRoleRepository>,
    /// Role guard.
    guard: RoleGuard,
}

impl MembershipService {
    /// Creates a new membership service.
    pub fn new(
        member_repo: Arc<MemberRepository>,
        user_repo: Arc<UserRepository>,
        role_repo: Arc<OrgRoleRepository>,
    ) -> Self {
        let guard = RoleGuard::new(Arc::clone(&member_repo));
        Self {
            member_repo,
            user_repo,
            role_repo,
            guard,
        }
    }

    /// Lists an organization's members. Members only.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
        page: &PageRequest,
    ) -> Result<PageResponse<Member>, AppError> {
        self.guard
            .require_member(organization_id, ctx.user_id)
            .await?;
        self.member_repo.list_by_org(organization_id, page).await
    }

    /// The caller's own membership in the organization.
    pub async fn current(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
    ) -> Result<Member, AppError> {
        self.member_repo
            .find_by_org_and_user(organization_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Member not found"))
    }

    /// The caller's role in the organization.
    pub async fn role_of(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
    ) -> Result<MemberRole, AppError> {
        self.guard
            .resolve_role(organization_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Member not found"))
    }

    /// Resolves a member by id or email within an organization.
    pub async fn resolve(
        &self,
        organization_id: OrganizationId,
        selector: &MemberSelector,
    ) -> Result<Member, AppError> {
        let member = match selector {
            MemberSelector::ById(id) => self.member_repo.find_by_id(*id).await?,
            MemberSelector::ByEmail(email) => {
                self.member_repo
                    .find_by_org_and_email(organization_id, email)
                    .await?
            }
        };

        member
            .filter(|m| m.organization_id == organization_id)
            .ok_or_else(|| AppError::not_found("Member not found"))
    }

    /// Adds a member directly, without an invitation. Owner or admin only.
    pub async fn add(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
        user_id: UserId,
        role: MemberRole,
    ) -> Result<Member, AppError> {
        self.guard
            .require_owner_or_admin(organization_id, ctx.user_id)
            .await?;

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if self
            .member_repo
            .exists_by_org_and_user(organization_id, user_id)
            .await?
        {
            return Err(AppError::conflict(
                "User is already a member of this organization",
            ));
        }

        self.member_repo
            .create(&CreateMember {
                organization_id,
                user_id,
                role,
            })
            .await
    }

    /// Removes a member. Owner or admin only; the owner is irremovable.
    pub async fn remove(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
        selector: &MemberSelector,
    ) -> Result<(), AppError> {
        self.guard
            .require_owner_or_admin(organization_id, ctx.user_id)
            .await?;

        let member = self.resolve(organization_id, selector).await?;

        if member.role.is_owner() {
            return Err(AppError::conflict(
                "The organization owner cannot be removed",
            ));
        }

        self.member_repo.delete(member.id).await?;

        info!(
            organization_id = %organization_id,
            member_id = %member.id,
            removed_by = %ctx.user_id,
            "Member removed"
        );

        Ok(())
    }

    /// Changes a member's role. Owner or admin only. The owner's role is
    /// immutable. Only an owner may grant the owner role; nothing caps the
    /// number of owners after such a grant.
    pub async fn update_role(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
        member_id: MemberId,
        new_role: MemberRole,
    ) -> Result<Member, AppError> {
        self.guard
            .require_owner_or_admin(organization_id, ctx.user_id)
            .await?;

        let member = self
            .member_repo
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| AppError::not_found("Member not found"))?;

        if member.organization_id != organization_id {
            return Err(AppError::conflict(
                "Member does not belong to this organization",
            ));
        }

        if member.role.is_owner() {
            return Err(AppError::conflict("The owner's role cannot be changed"));
        }

        if new_role.is_owner() {
            self.guard
                .require_any(organization_id, ctx.user_id, &[MemberRole::Owner])
                .await?;
        }

        self.member_repo.update_role(member.id, &new_role).await
    }

    /// Leaves the organization. The owner cannot leave.
    pub async fn leave(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
    ) -> Result<(), AppError> {
        let member = self.current(ctx, organization_id).await?;

        if member.role.is_owner() {
            return Err(AppError::conflict(
                "The owner cannot leave the organization",
            ));
        }

        self.member_repo.delete(member.id).await
    }

    /// Decides whether a user may perform `action` on `resource` within an
    /// organization. Never fails the request: absence of membership or a
    /// broken permission document is simply `false`.
    pub async fn has_permission(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
        resource: &str,
        action: &str,
    ) -> Result<bool, AppError> {
        let Some(member) = self
            .member_repo
            .find_by_org_and_user(organization_id, user_id)
            .await?
        else {
            return Ok(false);
        };

        let custom = match &member.role {
            MemberRole::Custom(name) => {
                match self
                    .role_repo
                    .find_by_org_and_name(organization_id, name)
                    .await?
                {
                    Some(role) => match role.parsed_permissions() {
                        Ok(perms) => Some(perms),
                        Err(e) => {
                            warn!(
                                organization_id = %organization_id,
                                role = %name,
                                error = %e,
                                "Unparseable permission document, denying"
                            );
                            None
                        }
                    },
                    None => None,
                }
            }
            _ => None,
        };

        Ok(permission::evaluate(
            &member.role,
            resource,
            action,
            custom.as_ref(),
        ))
    }
}
