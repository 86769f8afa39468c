//! Organization services: the organization itself, memberships, the
//! invitation workflow, and dynamic roles.

pub mod access;
pub mod invitations;
pub mod members;
pub mod permission;
pub mod roles;
pub mod selector;
pub mod service;

pub use access::RoleGuard;
pub use invitations::InvitationService;
pub use members::MembershipService;
pub use roles::RoleService;
pub use selector::{MemberSelector, OrgSelector, RoleSelector};
pub use service::{OrganizationService, OrganizationWithMembers};
