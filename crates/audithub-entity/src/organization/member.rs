//! Organization membership and the role model.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use audithub_core::types::{MemberId, OrganizationId, UserId};

/// The role a member holds within an organization.
///
/// Three roles are built in; anything else names a dynamic role defined by
/// the organization itself. Stored as text so the two kinds round-trip
/// through the same column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MemberRole {
    /// The organization owner. Unconditional permissions.
    Owner,
    /// Administrator. Everything except deleting the organization.
    Admin,
    /// Regular member. Read-only.
    Member,
    /// An organization-defined role, referenced by name.
    Custom(String),
}

impl MemberRole {
    /// Return the role as its stored string form.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Custom(name) => name,
        }
    }

    /// Whether this is one of the three built-in roles.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Whether this role is the owner.
    pub fn is_owner(&self) -> bool {
        matches!(self, Self::Owner)
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for MemberRole {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "owner" => Self::Owner,
            "admin" => Self::Admin,
            "member" => Self::Member,
            _ => Self::Custom(s),
        }
    }
}

impl From<MemberRole> for String {
    fn from(role: MemberRole) -> String {
        role.as_str().to_string()
    }
}

impl FromStr for MemberRole {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl sqlx::Type<sqlx::Postgres> for MemberRole {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for MemberRole {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'q, sqlx::Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for MemberRole {
    fn decode(
        value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(Self::from(s))
    }
}

/// A user's membership in an organization.
///
/// At most one membership exists per (organization, user) pair; the storage
/// layer enforces this with a unique constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Member {
    /// Unique membership identifier.
    pub id: MemberId,
    /// The organization.
    pub organization_id: OrganizationId,
    /// The user.
    pub user_id: UserId,
    /// The member's role within the organization.
    pub role: MemberRole,
    /// When the membership was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMember {
    /// The organization.
    pub organization_id: OrganizationId,
    /// The user.
    pub user_id: UserId,
    /// The role to grant.
    pub role: MemberRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_parsing() {
        assert_eq!(MemberRole::from("owner".to_string()), MemberRole::Owner);
        assert_eq!(MemberRole::from("ADMIN".to_string()), MemberRole::Admin);
        assert_eq!(MemberRole::from("member".to_string()), MemberRole::Member);
    }

    #[test]
    fn test_custom_role_preserves_name() {
        let role = MemberRole::from("auditor".to_string());
        assert_eq!(role, MemberRole::Custom("auditor".to_string()));
        assert_eq!(role.as_str(), "auditor");
        assert!(!role.is_builtin());
    }

    #[test]
    fn test_display_roundtrip() {
        for s in ["owner", "admin", "member", "field-inspector"] {
            let role: MemberRole = s.parse().unwrap();
            assert_eq!(role.to_string(), s);
        }
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&MemberRole::Owner).unwrap();
        assert_eq!(json, "\"owner\"");
        let role: MemberRole = serde_json::from_str("\"auditor\"").unwrap();
        assert_eq!(role, MemberRole::Custom("auditor".to_string()));
    }
}
