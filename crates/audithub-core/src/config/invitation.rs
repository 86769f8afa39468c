//! Organization invitation configuration.

use serde::{Deserialize, Serialize};

/// Organization invitation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationConfig {
    /// How long a pending invitation remains valid, in hours.
    /// Resending a pending invitation extends expiry by this much.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    /// Default number of members returned with a full organization view.
    #[serde(default = "default_member_page_size")]
    pub member_page_size: u64,
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            member_page_size: default_member_page_size(),
        }
    }
}

fn default_ttl_hours() -> u64 {
    48
}

fn default_member_page_size() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InvitationConfig::default();
        assert_eq!(config.ttl_hours, 48);
        assert_eq!(config.member_page_size, 100);
    }
}
