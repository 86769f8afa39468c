//! Request body DTOs.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// POST /api/auth/register
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Full display name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 8, max = 200))]
    pub password: String,
}

/// POST /api/auth/login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// POST /api/organizations
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Globally unique slug.
    #[validate(length(min = 2, max = 64))]
    pub slug: String,
    /// Logo URL.
    pub logo: Option<String>,
    /// Free-form metadata.
    pub metadata: Option<String>,
}

/// PUT /api/organizations/{id}
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateOrganizationRequest {
    /// New display name.
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    /// New slug.
    #[validate(length(min = 2, max = 64))]
    pub slug: Option<String>,
    /// New logo URL.
    pub logo: Option<String>,
    /// New metadata.
    pub metadata: Option<String>,
}

/// POST /api/organizations/activate — one of the two selectors, or neither
/// to clear the active organization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivateOrganizationRequest {
    /// Select by id.
    pub organization_id: Option<Uuid>,
    /// Select by slug.
    pub slug: Option<String>,
}

/// POST /api/organizations/{id}/invitations
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InviteMemberRequest {
    /// Invitee email.
    #[validate(email)]
    pub email: String,
    /// Role granted on acceptance; defaults to member.
    pub role: Option<String>,
    /// Extend an existing pending invitation instead of conflicting.
    #[serde(default)]
    pub resend: bool,
}

/// POST /api/organizations/{id}/members
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberRequest {
    /// The user to add.
    pub user_id: Uuid,
    /// Role to grant; defaults to member.
    pub role: Option<String>,
}

/// PUT /api/organizations/{id}/members/{member_id}/role
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMemberRoleRequest {
    /// The new role.
    #[validate(length(min = 1, max = 64))]
    pub role: String,
}

/// POST /api/organizations/{id}/roles
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoleRequest {
    /// Role name, unique per organization.
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    /// Permission document, JSON `{"resource": ["action", ...]}`.
    #[validate(length(min = 2))]
    pub permissions: String,
}

/// PUT /api/organizations/{id}/roles/{role}
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    /// New role name.
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,
    /// New permission document.
    pub permissions: Option<String>,
}

/// POST /api/organizations/{id}/check-permission
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckPermissionRequest {
    /// Resource token.
    #[validate(length(min = 1, max = 64))]
    pub resource: String,
    /// Action token.
    #[validate(length(min = 1, max = 64))]
    pub action: String,
}

/// GET /api/organizations/check-slug
#[derive(Debug, Clone, Deserialize)]
pub struct CheckSlugQuery {
    /// Candidate slug.
    pub slug: String,
}

/// GET /api/organizations/{id}/full
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FullViewQuery {
    /// Cap on the number of members returned.
    pub member_limit: Option<u64>,
}
