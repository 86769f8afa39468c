//! Union selectors for entities addressable by more than one key.
//!
//! Callers may reference members by id or email and roles by id or name.
//! Modeling the alternatives as one type keeps the resolution in a single
//! place instead of two sequential fallible lookups.

use audithub_core::types::{MemberId, OrgRoleId, OrganizationId};

/// Reference to an organization by id or slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgSelector {
    /// By primary key.
    ById(OrganizationId),
    /// By globally unique slug.
    BySlug(String),
}

/// Reference to a member by id or by the member's email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSelector {
    /// By primary key.
    ById(MemberId),
    /// By the member's email address.
    ByEmail(String),
}

impl MemberSelector {
    /// Interpret a path segment: a UUID selects by id, anything else is
    /// treated as an email.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<MemberId>() {
            Ok(id) => Self::ById(id),
            Err(_) => Self::ByEmail(raw.to_string()),
        }
    }
}

/// Reference to a dynamic role by id or name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSelector {
    /// By primary key.
    ById(OrgRoleId),
    /// By the role's name within the organization.
    ByName(String),
}

impl RoleSelector {
    /// Interpret a path segment: a UUID selects by id, anything else is
    /// treated as a role name.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<OrgRoleId>() {
            Ok(id) => Self::ById(id),
            Err(_) => Self::ByName(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_member_selector_parses_uuid_as_id() {
        let uuid = Uuid::new_v4().to_string();
        assert!(matches!(
            MemberSelector::parse(&uuid),
            MemberSelector::ById(_)
        ));
    }

    #[test]
    fn test_member_selector_parses_email() {
        assert_eq!(
            MemberSelector::parse("b@x.com"),
            MemberSelector::ByEmail("b@x.com".to_string())
        );
    }

    #[test]
    fn test_role_selector_parses_name() {
        assert_eq!(
            RoleSelector::parse("auditor"),
            RoleSelector::ByName("auditor".to_string())
        );
    }
}
