//! Organization aggregate: the organization itself, memberships,
//! invitations, and organization-defined roles.

pub mod invitation;
pub mod member;
pub mod model;
pub mod role;

pub use invitation::{CreateInvitation, Invitation, InvitationStatus};
pub use member::{CreateMember, Member, MemberRole};
pub use model::{CreateOrganization, Organization, UpdateOrganization};
pub use role::{CreateOrgRole, OrgRole, RolePermissions, UpdateOrgRole};
