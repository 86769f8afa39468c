//! Organization invitation entity and its state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use audithub_core::types::{InvitationId, OrganizationId, UserId};

use super::member::MemberRole;

/// Invitation lifecycle status.
///
/// `Pending` is the only non-terminal state. Resending an invitation
/// extends its expiry but never changes the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invitation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    /// Awaiting a response from the invitee.
    Pending,
    /// The invitee accepted; a membership was created.
    Accepted,
    /// The invitee declined.
    Rejected,
    /// An owner or admin withdrew the invitation.
    Canceled,
}

/// A time-boxed invitation to join an organization.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invitation {
    /// Unique invitation identifier.
    pub id: InvitationId,
    /// Invitee email address.
    pub email: String,
    /// The organization the invitee is invited to.
    pub organization_id: OrganizationId,
    /// The user who sent the invitation.
    pub inviter_id: UserId,
    /// The role the invitee will receive on acceptance.
    pub role: MemberRole,
    /// Current lifecycle status.
    pub status: InvitationStatus,
    /// When the invitation was created.
    pub created_at: DateTime<Utc>,
    /// When the invitation expires. Only meaningful while pending.
    pub expires_at: DateTime<Utc>,
}

impl Invitation {
    /// Whether the invitation is still awaiting a response.
    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }

    /// Whether the invitation's window has closed. A pending invitation
    /// past this point can no longer be accepted, even though its status
    /// still reads pending.
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }

    /// Whether the given email is the invitee's, ignoring ASCII case.
    pub fn is_addressed_to(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}

/// Data required to create a new invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvitation {
    /// Invitee email address.
    pub email: String,
    /// The target organization.
    pub organization_id: OrganizationId,
    /// The inviting user.
    pub inviter_id: UserId,
    /// The role to grant on acceptance.
    pub role: MemberRole,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invitation(status: InvitationStatus, expires_at: DateTime<Utc>) -> Invitation {
        Invitation {
            id: InvitationId::new(),
            email: "b@x.com".to_string(),
            organization_id: OrganizationId::new(),
            inviter_id: UserId::new(),
            role: MemberRole::Member,
            status,
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn test_pending_but_expired() {
        let inv = invitation(
            InvitationStatus::Pending,
            Utc::now() - Duration::seconds(1),
        );
        assert!(inv.is_pending());
        assert!(inv.is_expired());
    }

    #[test]
    fn test_terminal_states_not_pending() {
        for status in [
            InvitationStatus::Accepted,
            InvitationStatus::Rejected,
            InvitationStatus::Canceled,
        ] {
            let inv = invitation(status, Utc::now() + Duration::hours(48));
            assert!(!inv.is_pending());
        }
    }

    #[test]
    fn test_addressed_to_ignores_case() {
        let inv = invitation(InvitationStatus::Pending, Utc::now() + Duration::hours(1));
        assert!(inv.is_addressed_to("B@X.com"));
        assert!(!inv.is_addressed_to("a@x.com"));
    }
}
