//! Organization handlers — lifecycle, membership, invitations, roles.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use audithub_core::error::AppError;
use audithub_core::types::pagination::{PageRequest, PageResponse};
use audithub_core::types::{InvitationId, MemberId, OrganizationId, UserId};
use audithub_entity::organization::{
    CreateOrganization, Invitation, Member, MemberRole, OrgRole, Organization, UpdateOrgRole,
    UpdateOrganization,
};
use audithub_service::organization::{MemberSelector, OrgSelector, RoleSelector};

use crate::dto::request::{
    ActivateOrganizationRequest, AddMemberRequest, CheckPermissionRequest, CheckSlugQuery,
    CreateOrganizationRequest, CreateRoleRequest, FullViewQuery, InviteMemberRequest,
    UpdateMemberRoleRequest, UpdateOrganizationRequest, UpdateRoleRequest,
};
use crate::dto::response::{
    ApiResponse, MessageResponse, PermissionCheckResponse, SlugAvailabilityResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

fn default_role(raw: Option<String>) -> MemberRole {
    raw.map(MemberRole::from).unwrap_or(MemberRole::Member)
}

/// POST /api/organizations
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateOrganizationRequest>,
) -> Result<Json<ApiResponse<Organization>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let organization = state
        .organization_service
        .create(
            &auth,
            CreateOrganization {
                name: req.name,
                slug: req.slug,
                logo: req.logo,
                metadata: req.metadata,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(organization)))
}

/// GET /api/organizations/check-slug?slug=...
pub async fn check_slug(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<CheckSlugQuery>,
) -> Result<Json<ApiResponse<SlugAvailabilityResponse>>, ApiError> {
    let available = state
        .organization_service
        .is_slug_available(&query.slug)
        .await?;
    Ok(Json(ApiResponse::ok(SlugAvailabilityResponse {
        available,
    })))
}

/// GET /api/organizations
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Organization>>>, ApiError> {
    let organizations = state.organization_service.list_for_user(&auth).await?;
    Ok(Json(ApiResponse::ok(organizations)))
}

/// POST /api/organizations/activate
pub async fn activate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ActivateOrganizationRequest>,
) -> Result<Json<ApiResponse<Option<Organization>>>, ApiError> {
    let selector = match (req.organization_id, req.slug) {
        (Some(id), _) => Some(OrgSelector::ById(OrganizationId::from_uuid(id))),
        (None, Some(slug)) => Some(OrgSelector::BySlug(slug)),
        (None, None) => None,
    };

    let organization = state.organization_service.set_active(&auth, selector).await?;
    Ok(Json(ApiResponse::ok(organization)))
}

/// GET /api/organizations/{id}/full
pub async fn get_full(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<FullViewQuery>,
) -> Result<
    Json<ApiResponse<audithub_service::organization::OrganizationWithMembers>>,
    ApiError,
> {
    let view = state
        .organization_service
        .get_full(&auth, OrganizationId::from_uuid(id), query.member_limit)
        .await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// PUT /api/organizations/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrganizationRequest>,
) -> Result<Json<ApiResponse<Organization>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let organization = state
        .organization_service
        .update(
            &auth,
            OrganizationId::from_uuid(id),
            UpdateOrganization {
                name: req.name,
                slug: req.slug,
                logo: req.logo,
                metadata: req.metadata,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(organization)))
}

/// DELETE /api/organizations/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .organization_service
        .delete(&auth, OrganizationId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Organization deleted",
    ))))
}

// ── Members ──────────────────────────────────────────────────────────

/// GET /api/organizations/{id}/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(page): Query<PageRequest>,
) -> Result<Json<ApiResponse<PageResponse<Member>>>, ApiError> {
    let members = state
        .membership_service
        .list(&auth, OrganizationId::from_uuid(id), &page)
        .await?;
    Ok(Json(ApiResponse::ok(members)))
}

/// GET /api/organizations/{id}/members/me
pub async fn current_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Member>>, ApiError> {
    let member = state
        .membership_service
        .current(&auth, OrganizationId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(member)))
}

/// GET /api/organizations/{id}/members/me/role
pub async fn current_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MemberRole>>, ApiError> {
    let role = state
        .membership_service
        .role_of(&auth, OrganizationId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(role)))
}

/// POST /api/organizations/{id}/members
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<AddMemberRequest>,
) -> Result<Json<ApiResponse<Member>>, ApiError> {
    let member = state
        .membership_service
        .add(
            &auth,
            OrganizationId::from_uuid(id),
            UserId::from_uuid(req.user_id),
            default_role(req.role),
        )
        .await?;
    Ok(Json(ApiResponse::ok(member)))
}

/// DELETE /api/organizations/{id}/members/{member} — by id or email.
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, member)): Path<(Uuid, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .membership_service
        .remove(
            &auth,
            OrganizationId::from_uuid(id),
            &MemberSelector::parse(&member),
        )
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Member removed"))))
}

/// PUT /api/organizations/{id}/members/{member_id}/role
pub async fn update_member_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, member_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateMemberRoleRequest>,
) -> Result<Json<ApiResponse<Member>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let member = state
        .membership_service
        .update_role(
            &auth,
            OrganizationId::from_uuid(id),
            MemberId::from_uuid(member_id),
            MemberRole::from(req.role),
        )
        .await?;
    Ok(Json(ApiResponse::ok(member)))
}

/// POST /api/organizations/{id}/leave
pub async fn leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .membership_service
        .leave(&auth, OrganizationId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Left the organization",
    ))))
}

/// POST /api/organizations/{id}/check-permission
pub async fn check_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CheckPermissionRequest>,
) -> Result<Json<ApiResponse<PermissionCheckResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let allowed = state
        .membership_service
        .has_permission(
            OrganizationId::from_uuid(id),
            auth.user_id,
            &req.resource,
            &req.action,
        )
        .await?;
    Ok(Json(ApiResponse::ok(PermissionCheckResponse { allowed })))
}

// ── Invitations ──────────────────────────────────────────────────────

/// POST /api/organizations/{id}/invitations
pub async fn invite_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<InviteMemberRequest>,
) -> Result<Json<ApiResponse<Invitation>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let invitation = state
        .invitation_service
        .invite(
            &auth,
            OrganizationId::from_uuid(id),
            &req.email,
            default_role(req.role),
            req.resend,
        )
        .await?;
    Ok(Json(ApiResponse::ok(invitation)))
}

/// GET /api/organizations/{id}/invitations
pub async fn list_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Invitation>>>, ApiError> {
    let invitations = state
        .invitation_service
        .list_for_org(&auth, OrganizationId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(invitations)))
}

/// GET /api/invitations/mine
pub async fn my_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Invitation>>>, ApiError> {
    let invitations = state.invitation_service.list_mine(&auth).await?;
    Ok(Json(ApiResponse::ok(invitations)))
}

/// GET /api/invitations/{id}
pub async fn get_invitation(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Invitation>>, ApiError> {
    let invitation = state
        .invitation_service
        .get(InvitationId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(invitation)))
}

/// POST /api/invitations/{id}/accept
pub async fn accept_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Member>>, ApiError> {
    let member = state
        .invitation_service
        .accept(&auth, InvitationId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(member)))
}

/// POST /api/invitations/{id}/reject
pub async fn reject_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Invitation>>, ApiError> {
    let invitation = state
        .invitation_service
        .reject(&auth, InvitationId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(invitation)))
}

/// POST /api/invitations/{id}/cancel
pub async fn cancel_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Invitation>>, ApiError> {
    let invitation = state
        .invitation_service
        .cancel(&auth, InvitationId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(invitation)))
}

// ── Dynamic roles ────────────────────────────────────────────────────

/// POST /api/organizations/{id}/roles
pub async fn create_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateRoleRequest>,
) -> Result<Json<ApiResponse<OrgRole>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let role = state
        .role_service
        .create(
            &auth,
            OrganizationId::from_uuid(id),
            &req.name,
            &req.permissions,
        )
        .await?;
    Ok(Json(ApiResponse::ok(role)))
}

/// GET /api/organizations/{id}/roles
pub async fn list_roles(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<OrgRole>>>, ApiError> {
    let roles = state
        .role_service
        .list(&auth, OrganizationId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(roles)))
}

/// GET /api/organizations/{id}/roles/{role} — by id or name.
pub async fn get_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, role)): Path<(Uuid, String)>,
) -> Result<Json<ApiResponse<OrgRole>>, ApiError> {
    let role = state
        .role_service
        .get(
            &auth,
            OrganizationId::from_uuid(id),
            &RoleSelector::parse(&role),
        )
        .await?;
    Ok(Json(ApiResponse::ok(role)))
}

/// PUT /api/organizations/{id}/roles/{role}
pub async fn update_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, role)): Path<(Uuid, String)>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<ApiResponse<OrgRole>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let role = state
        .role_service
        .update(
            &auth,
            OrganizationId::from_uuid(id),
            &RoleSelector::parse(&role),
            UpdateOrgRole {
                name: req.name,
                permissions: req.permissions,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(role)))
}

/// DELETE /api/organizations/{id}/roles/{role}
pub async fn delete_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, role)): Path<(Uuid, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .role_service
        .delete(
            &auth,
            OrganizationId::from_uuid(id),
            &RoleSelector::parse(&role),
        )
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Role deleted"))))
}
