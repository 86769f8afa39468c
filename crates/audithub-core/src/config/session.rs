//! Session management configuration.

use serde::{Deserialize, Serialize};

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session time-to-live in seconds. Renewal slides expiry by this much.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    /// Interval between expired-session sweeps, in milliseconds.
    #[serde(default = "default_reaper_interval")]
    pub reaper_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            reaper_interval_ms: default_reaper_interval(),
        }
    }
}

fn default_ttl_seconds() -> u64 {
    604_800 // 7 days
}

fn default_reaper_interval() -> u64 {
    3_600_000 // 1 hour
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.ttl_seconds, 604_800);
        assert_eq!(config.reaper_interval_ms, 3_600_000);
    }
}
