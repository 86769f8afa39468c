//! Token value type returned on login and registration.

use serde::{Deserialize, Serialize};

/// An issued opaque session token.
///
/// The edge collaborator is responsible for setting the cookie
/// (HttpOnly, Secure, SameSite, Max-Age = `expires_in`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    /// The raw bearer secret.
    pub token: String,
    /// TTL in seconds.
    pub expires_in: u64,
}
