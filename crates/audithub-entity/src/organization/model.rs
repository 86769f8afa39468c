//! Organization entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use audithub_core::types::OrganizationId;

/// A multi-tenant organization.
///
/// Owns memberships, invitations, and dynamic roles; deleting the
/// organization removes all of them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Organization {
    /// Unique organization identifier.
    pub id: OrganizationId,
    /// Display name.
    pub name: String,
    /// Globally unique URL slug.
    pub slug: String,
    /// Logo URL.
    pub logo: Option<String>,
    /// Free-form metadata.
    pub metadata: Option<String>,
    /// When the organization was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    /// Display name.
    pub name: String,
    /// Globally unique URL slug.
    pub slug: String,
    /// Logo URL.
    pub logo: Option<String>,
    /// Free-form metadata.
    pub metadata: Option<String>,
}

/// Data for updating an existing organization. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrganization {
    /// New display name.
    pub name: Option<String>,
    /// New slug (uniqueness re-checked).
    pub slug: Option<String>,
    /// New logo URL.
    pub logo: Option<String>,
    /// New metadata.
    pub metadata: Option<String>,
}
