//! Role-based guards for organization operations.

use std::sync::Arc;

use audithub_core::error::AppError;
use audithub_core::types::{OrganizationId, UserId};
use audithub_database::repositories::member::MemberRepository;
use audithub_entity::organization::{Member, MemberRole};

/// Resolves memberships and enforces role requirements.
///
/// Every mutating organization operation routes through one of the
/// `require_*` methods before touching anything.
#[derive(Debug, Clone)]
pub struct RoleGuard {
    /// Membership repository.
    members: Arc<MemberRepository>,
}

impl RoleGuard {
    /// Creates a new role guard.
    pub fn new(members: Arc<MemberRepository>) -> Self {
        Self { members }
    }

    /// Resolves the role a user holds in an organization, if any.
    pub async fn resolve_role(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> Result<Option<MemberRole>, AppError> {
        Ok(self
            .members
            .find_by_org_and_user(organization_id, user_id)
            .await?
            .map(|m| m.role))
    }

    /// Requires the user to be a member of the organization.
    pub async fn require_member(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> Result<Member, AppError> {
        self.members
            .find_by_org_and_user(organization_id, user_id)
            .await?
            .ok_or_else(|| AppError::forbidden("You are not a member of this organization"))
    }

    /// Requires the user's role to be one of the allowed set.
    pub async fn require_any(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
        allowed: &[MemberRole],
    ) -> Result<Member, AppError> {
        let member = self.require_member(organization_id, user_id).await?;

        if !allowed.contains(&member.role) {
            return Err(AppError::forbidden(
                "You do not have permission to perform this action",
            ));
        }

        Ok(member)
    }

    /// Shorthand for the owner/admin requirement shared by most mutations.
    pub async fn require_owner_or_admin(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> Result<Member, AppError> {
        self.require_any(
            organization_id,
            user_id,
            &[MemberRole::Owner, MemberRole::Admin],
        )
        .await
    }
}
