//! Organization CRUD and session scoping.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use audithub_auth::session::SessionManager;
use audithub_core::config::invitation::InvitationConfig;
use audithub_core::error::AppError;
use audithub_core::types::OrganizationId;
use audithub_core::types::pagination::PageRequest;
use audithub_database::repositories::invitation::InvitationRepository;
use audithub_database::repositories::member::MemberRepository;
use audithub_database::repositories::organization::OrganizationRepository;
use audithub_entity::organization::{
    CreateMember, CreateOrganization, Invitation, Member, MemberRole, Organization,
    UpdateOrganization,
};

use crate::context::RequestContext;

use super::access::RoleGuard;
use super::selector::OrgSelector;

/// An organization together with its members and pending invitations.
#[derive(Debug, Clone, Serialize)]
pub struct OrganizationWithMembers {
    /// The organization.
    pub organization: Organization,
    /// Members, capped at the configured page size.
    pub members: Vec<Member>,
    /// Invitations still awaiting a response.
    pub pending_invitations: Vec<Invitation>,
}

/// Organization lifecycle and session scoping.
#[derive(Debug, Clone)]
pub struct OrganizationService {
    /// Organization repository.
    org_repo: Arc<OrganizationRepository>,
    /// Membership repository.
    member_repo: Arc<MemberRepository>,
    /// Invitation repository (for the full view).
    invitation_repo: Arc<InvitationRepository>,
    /// Session manager (for organization switching).
    sessions: Arc<SessionManager>,
    /// Role guard.
    guard: RoleGuard,
    /// Invitation/member-list configuration.
    config: InvitationConfig,
}

impl OrganizationService {
    /// Creates a new organization service.
    pub fn new(
        org_repo: Arc<OrganizationRepository>,
        member_repo: Arc<MemberRepository>,
        invitation_repo: Arc<InvitationRepository>,
        sessions: Arc<SessionManager>,
        config: InvitationConfig,
    ) -> Self {
        let guard = RoleGuard::new(Arc::clone(&member_repo));
        Self {
            org_repo,
            member_repo,
            invitation_repo,
            sessions,
            guard,
            config,
        }
    }

    /// Creates a new organization; the caller becomes its sole owner.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateOrganization,
    ) -> Result<Organization, AppError> {
        if self.org_repo.exists_by_slug(&data.slug).await? {
            return Err(AppError::conflict("Slug is already in use"));
        }

        let organization = self.org_repo.create(&data).await?;

        self.member_repo
            .create(&CreateMember {
                organization_id: organization.id,
                user_id: ctx.user_id,
                role: MemberRole::Owner,
            })
            .await?;

        info!(
            organization_id = %organization.id,
            owner_id = %ctx.user_id,
            slug = %organization.slug,
            "Organization created"
        );

        Ok(organization)
    }

    /// Whether a slug is still available.
    pub async fn is_slug_available(&self, slug: &str) -> Result<bool, AppError> {
        Ok(!self.org_repo.exists_by_slug(slug).await?)
    }

    /// Lists every organization the caller belongs to.
    pub async fn list_for_user(&self, ctx: &RequestContext) -> Result<Vec<Organization>, AppError> {
        self.member_repo.list_organizations_for_user(ctx.user_id).await
    }

    /// Resolves an organization by id or slug.
    pub async fn resolve(&self, selector: &OrgSelector) -> Result<Organization, AppError> {
        match selector {
            OrgSelector::ById(id) => self
                .org_repo
                .find_by_id(*id)
                .await?
                .ok_or_else(|| AppError::not_found("Organization not found")),
            OrgSelector::BySlug(slug) => self
                .org_repo
                .find_by_slug(slug)
                .await?
                .ok_or_else(|| AppError::not_found("Organization not found")),
        }
    }

    /// Scopes the current session to an organization, or clears the scope
    /// when `selector` is `None`. Requires membership; the session store
    /// itself enforces no policy.
    pub async fn set_active(
        &self,
        ctx: &RequestContext,
        selector: Option<OrgSelector>,
    ) -> Result<Option<Organization>, AppError> {
        let Some(selector) = selector else {
            self.sessions
                .set_active_organization(&ctx.session_token, None)
                .await?;
            return Ok(None);
        };

        let organization = self.resolve(&selector).await?;
        self.guard
            .require_member(organization.id, ctx.user_id)
            .await?;

        self.sessions
            .set_active_organization(&ctx.session_token, Some(organization.id))
            .await?;

        Ok(Some(organization))
    }

    /// Fetches an organization with its members and pending invitations.
    /// Members only.
    pub async fn get_full(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
        member_limit: Option<u64>,
    ) -> Result<OrganizationWithMembers, AppError> {
        let organization = self.resolve(&OrgSelector::ById(organization_id)).await?;
        self.guard
            .require_member(organization_id, ctx.user_id)
            .await?;

        let limit = member_limit.unwrap_or(self.config.member_page_size);
        let members = self
            .member_repo
            .list_by_org(organization_id, &PageRequest::new(1, limit))
            .await?
            .items;
        let pending_invitations = self
            .invitation_repo
            .list_pending_by_org(organization_id)
            .await?;

        Ok(OrganizationWithMembers {
            organization,
            members,
            pending_invitations,
        })
    }

    /// Updates an organization. Owner or admin only; a slug change
    /// re-checks global uniqueness.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
        data: UpdateOrganization,
    ) -> Result<Organization, AppError> {
        let mut organization = self.resolve(&OrgSelector::ById(organization_id)).await?;
        self.guard
            .require_owner_or_admin(organization_id, ctx.user_id)
            .await?;

        if let Some(slug) = data.slug {
            if slug != organization.slug {
                if self.org_repo.exists_by_slug(&slug).await? {
                    return Err(AppError::conflict("Slug is already in use"));
                }
                organization.slug = slug;
            }
        }
        if let Some(name) = data.name {
            organization.name = name;
        }
        if let Some(logo) = data.logo {
            organization.logo = Some(logo);
        }
        if let Some(metadata) = data.metadata {
            organization.metadata = Some(metadata);
        }

        self.org_repo.update(&organization).await
    }

    /// Deletes an organization and everything it owns. Owner only.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
    ) -> Result<(), AppError> {
        self.resolve(&OrgSelector::ById(organization_id)).await?;
        self.guard
            .require_any(organization_id, ctx.user_id, &[MemberRole::Owner])
            .await?;

        self.org_repo.delete_cascade(organization_id).await?;

        info!(
            organization_id = %organization_id,
            deleted_by = %ctx.user_id,
            "Organization deleted"
        );

        Ok(())
    }
}
