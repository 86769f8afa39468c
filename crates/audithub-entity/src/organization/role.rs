//! Organization-defined dynamic roles and their permission documents.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use audithub_core::error::AppError;
use audithub_core::types::{OrgRoleId, OrganizationId};

/// A dynamic role defined by an organization.
///
/// Referenced by name from `Member.role`. The permission document is JSON
/// of the form `{"resource": ["action", ...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrgRole {
    /// Unique role identifier.
    pub id: OrgRoleId,
    /// The defining organization.
    pub organization_id: OrganizationId,
    /// Role name, unique per organization.
    pub name: String,
    /// Permission document (JSON text).
    pub permissions: String,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
    /// When the role was last updated.
    pub updated_at: DateTime<Utc>,
}

impl OrgRole {
    /// Parse this role's permission document.
    pub fn parsed_permissions(&self) -> Result<RolePermissions, AppError> {
        RolePermissions::parse(&self.permissions)
    }
}

/// A parsed permission document: resource → allowed actions.
///
/// Lookup is an exact, case-insensitive match on both tokens. Substring
/// containment is deliberately not used, so "report" never matches an
/// entry for "reports".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissions {
    grants: HashMap<String, Vec<String>>,
}

impl RolePermissions {
    /// Parse a JSON permission document of the form
    /// `{"resource": ["action", ...]}`.
    pub fn parse(document: &str) -> Result<Self, AppError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(document)
            .map_err(|e| AppError::validation(format!("Invalid permission document: {e}")))?;

        let grants = raw
            .into_iter()
            .map(|(resource, actions)| {
                (
                    resource.to_lowercase(),
                    actions.into_iter().map(|a| a.to_lowercase()).collect(),
                )
            })
            .collect();

        Ok(Self { grants })
    }

    /// Whether the document grants `action` on `resource`.
    pub fn allows(&self, resource: &str, action: &str) -> bool {
        self.grants
            .get(&resource.to_lowercase())
            .is_some_and(|actions| actions.iter().any(|a| a == &action.to_lowercase()))
    }

    /// Whether the document grants nothing at all.
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

/// Data required to create a dynamic role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrgRole {
    /// The defining organization.
    pub organization_id: OrganizationId,
    /// Role name, unique per organization.
    pub name: String,
    /// Permission document (JSON text).
    pub permissions: String,
}

/// Data for updating a dynamic role. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrgRole {
    /// New role name (uniqueness re-checked).
    pub name: Option<String>,
    /// New permission document.
    pub permissions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_lookup() {
        let perms = RolePermissions::parse(r#"{"audit": ["read", "write"]}"#).unwrap();
        assert!(perms.allows("audit", "read"));
        assert!(perms.allows("AUDIT", "Write"));
        assert!(!perms.allows("audit", "delete"));
        assert!(!perms.allows("organization", "read"));
    }

    #[test]
    fn test_no_substring_false_positives() {
        // "reports" must not grant anything on "report".
        let perms = RolePermissions::parse(r#"{"reports": ["read"]}"#).unwrap();
        assert!(perms.allows("reports", "read"));
        assert!(!perms.allows("report", "read"));
    }

    #[test]
    fn test_invalid_document_rejected() {
        assert!(RolePermissions::parse("not json").is_err());
        assert!(RolePermissions::parse(r#"{"audit": "read"}"#).is_err());
    }

    #[test]
    fn test_empty_document() {
        let perms = RolePermissions::parse("{}").unwrap();
        assert!(perms.is_empty());
        assert!(!perms.allows("anything", "read"));
    }
}
