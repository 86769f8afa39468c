//! The invitation workflow state machine.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;

use audithub_core::config::invitation::InvitationConfig;
use audithub_core::error::AppError;
use audithub_core::types::{InvitationId, OrganizationId};
use audithub_database::repositories::invitation::InvitationRepository;
use audithub_database::repositories::member::MemberRepository;
use audithub_entity::organization::{
    CreateInvitation, CreateMember, Invitation, InvitationStatus, Member, MemberRole,
};

use crate::context::RequestContext;

use super::access::RoleGuard;

/// Time-boxed organization invitations.
///
/// `pending` is the only live state; accept, reject, and cancel each move
/// the invitation to a terminal state exactly once. Resending merely pushes
/// the expiry out.
#[derive(Debug, Clone)]
pub struct InvitationService {
    /// Invitation repository.
    invitation_repo: Arc<InvitationRepository>,
    /// Membership repository.
    member_repo: Arc<MemberRepository>,
    /// Role guard.
    guard: RoleGuard,
    /// Invitation TTL configuration.
    config: InvitationConfig,
}

impl InvitationService {
    /// Creates a new invitation service.
    pub fn new(
        invitation_repo: Arc<InvitationRepository>,
        member_repo: Arc<MemberRepository>,
        config: InvitationConfig,
    ) -> Self {
        let guard = RoleGuard::new(Arc::clone(&member_repo));
        Self {
            invitation_repo,
            member_repo,
            guard,
            config,
        }
    }

    fn next_expiry(&self) -> chrono::DateTime<Utc> {
        Utc::now() + Duration::hours(self.config.ttl_hours as i64)
    }

    /// Invites an email address into the organization. Owner or admin only.
    ///
    /// If a pending invitation already exists for this address, `resend`
    /// extends its expiry; otherwise the call conflicts.
    pub async fn invite(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
        email: &str,
        role: MemberRole,
        resend: bool,
    ) -> Result<Invitation, AppError> {
        self.guard
            .require_owner_or_admin(organization_id, ctx.user_id)
            .await?;

        if self
            .member_repo
            .find_by_org_and_email(organization_id, email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "User is already a member of this organization",
            ));
        }

        if let Some(existing) = self
            .invitation_repo
            .find_pending_by_org_and_email(organization_id, email)
            .await?
        {
            if resend {
                return self
                    .invitation_repo
                    .extend_expiry(existing.id, self.next_expiry())
                    .await;
            }
            return Err(AppError::conflict(
                "A pending invitation already exists for this email",
            ));
        }

        let invitation = self
            .invitation_repo
            .create(&CreateInvitation {
                email: email.to_string(),
                organization_id,
                inviter_id: ctx.user_id,
                role,
                expires_at: self.next_expiry(),
            })
            .await?;

        info!(
            organization_id = %organization_id,
            invitation_id = %invitation.id,
            invited_by = %ctx.user_id,
            "Invitation created"
        );

        Ok(invitation)
    }

    /// Accepts an invitation addressed to the caller. Creates the
    /// membership and flips the status in one transaction.
    pub async fn accept(
        &self,
        ctx: &RequestContext,
        invitation_id: InvitationId,
    ) -> Result<Member, AppError> {
        let invitation = self.find(invitation_id).await?;

        if !invitation.is_addressed_to(&ctx.email) {
            return Err(AppError::forbidden(
                "This invitation is not addressed to you",
            ));
        }

        if !invitation.is_pending() {
            return Err(AppError::conflict("Invitation is no longer pending"));
        }

        if invitation.is_expired() {
            return Err(AppError::conflict("Invitation has expired"));
        }

        if self
            .member_repo
            .exists_by_org_and_user(invitation.organization_id, ctx.user_id)
            .await?
        {
            return Err(AppError::conflict(
                "You are already a member of this organization",
            ));
        }

        let member = self
            .invitation_repo
            .accept(
                invitation.id,
                &CreateMember {
                    organization_id: invitation.organization_id,
                    user_id: ctx.user_id,
                    role: invitation.role.clone(),
                },
            )
            .await?;

        info!(
            organization_id = %invitation.organization_id,
            invitation_id = %invitation.id,
            user_id = %ctx.user_id,
            "Invitation accepted"
        );

        Ok(member)
    }

    /// Rejects an invitation addressed to the caller.
    pub async fn reject(
        &self,
        ctx: &RequestContext,
        invitation_id: InvitationId,
    ) -> Result<Invitation, AppError> {
        let invitation = self.find(invitation_id).await?;

        if !invitation.is_addressed_to(&ctx.email) {
            return Err(AppError::forbidden(
                "This invitation is not addressed to you",
            ));
        }

        if !invitation.is_pending() {
            return Err(AppError::conflict("Invitation is no longer pending"));
        }

        self.invitation_repo
            .update_status(invitation.id, InvitationStatus::Rejected)
            .await
    }

    /// Cancels a pending invitation. Owner or admin of the organization.
    pub async fn cancel(
        &self,
        ctx: &RequestContext,
        invitation_id: InvitationId,
    ) -> Result<Invitation, AppError> {
        let invitation = self.find(invitation_id).await?;

        self.guard
            .require_owner_or_admin(invitation.organization_id, ctx.user_id)
            .await?;

        if !invitation.is_pending() {
            return Err(AppError::conflict("Invitation is no longer pending"));
        }

        self.invitation_repo
            .update_status(invitation.id, InvitationStatus::Canceled)
            .await
    }

    /// Fetches a single invitation.
    pub async fn get(&self, invitation_id: InvitationId) -> Result<Invitation, AppError> {
        self.find(invitation_id).await
    }

    /// Lists an organization's invitations. Members only.
    pub async fn list_for_org(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
    ) -> Result<Vec<Invitation>, AppError> {
        self.guard
            .require_member(organization_id, ctx.user_id)
            .await?;
        self.invitation_repo.list_by_org(organization_id).await
    }

    /// Lists the caller's still-valid pending invitations.
    pub async fn list_mine(&self, ctx: &RequestContext) -> Result<Vec<Invitation>, AppError> {
        self.invitation_repo
            .list_pending_valid_by_email(&ctx.email, Utc::now())
            .await
    }

    async fn find(&self, invitation_id: InvitationId) -> Result<Invitation, AppError> {
        self.invitation_repo
            .find_by_id(invitation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Invitation not found"))
    }
}
