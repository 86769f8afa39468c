//! The permission decision for a {resource, action} pair.

use audithub_entity::organization::{MemberRole, RolePermissions};

/// Decides whether a role may perform `action` on `resource`.
///
/// - Owner: unconditionally allowed.
/// - Admin: allowed, except deleting the organization itself.
/// - Member: read-only.
/// - Dynamic role: decided by the organization's permission document, an
///   exact {resource: [actions]} lookup. A member holding a dynamic role
///   with no document (the role was deleted out from under them) gets
///   nothing.
pub fn evaluate(
    role: &MemberRole,
    resource: &str,
    action: &str,
    custom: Option<&RolePermissions>,
) -> bool {
    match role {
        MemberRole::Owner => true,
        MemberRole::Admin => !(resource == "organization" && action == "delete"),
        MemberRole::Member => action == "read",
        MemberRole::Custom(_) => custom.is_some_and(|perms| perms.allows(resource, action)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_unconditional() {
        assert!(evaluate(&MemberRole::Owner, "organization", "delete", None));
        assert!(evaluate(&MemberRole::Owner, "anything", "write", None));
    }

    #[test]
    fn test_admin_cannot_delete_organization() {
        assert!(!evaluate(&MemberRole::Admin, "organization", "delete", None));
        assert!(evaluate(&MemberRole::Admin, "organization", "update", None));
        assert!(evaluate(&MemberRole::Admin, "audit", "delete", None));
    }

    #[test]
    fn test_member_read_only() {
        assert!(evaluate(&MemberRole::Member, "anything", "read", None));
        assert!(!evaluate(&MemberRole::Member, "anything", "write", None));
        assert!(!evaluate(&MemberRole::Member, "anything", "delete", None));
    }

    #[test]
    fn test_custom_role_uses_document() {
        let role = MemberRole::Custom("auditor".to_string());
        let perms = RolePermissions::parse(r#"{"audit": ["read", "write"]}"#).unwrap();

        assert!(evaluate(&role, "audit", "read", Some(&perms)));
        assert!(evaluate(&role, "audit", "write", Some(&perms)));
        assert!(!evaluate(&role, "audit", "delete", Some(&perms)));
        assert!(!evaluate(&role, "organization", "read", Some(&perms)));
    }

    #[test]
    fn test_custom_role_without_document_denied() {
        let role = MemberRole::Custom("ghost".to_string());
        assert!(!evaluate(&role, "audit", "read", None));
    }

    #[test]
    fn test_no_substring_match_across_resources() {
        // A grant on "reports" must not leak onto "report".
        let role = MemberRole::Custom("analyst".to_string());
        let perms = RolePermissions::parse(r#"{"reports": ["read"]}"#).unwrap();
        assert!(!evaluate(&role, "report", "read", Some(&perms)));
    }
}
