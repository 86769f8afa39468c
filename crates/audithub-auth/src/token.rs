//! Opaque session token generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::TryRng;
use rand::rngs::SysRng;

use audithub_core::error::AppError;

/// Number of random bytes per token (256 bits).
const TOKEN_BYTES: usize = 32;

/// Generates opaque bearer tokens.
///
/// Tokens carry no claims; validity always requires a server-side lookup.
#[derive(Debug, Clone, Default)]
pub struct TokenGenerator;

impl TokenGenerator {
    /// Create a new token generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh token: 256 bits from the OS entropy source,
    /// URL-safe base64 without padding. An entropy-source failure is fatal
    /// to the request.
    pub fn generate(&self) -> Result<String, AppError> {
        let mut bytes = [0u8; TOKEN_BYTES];
        SysRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| AppError::internal(format!("Entropy source failure: {e}")))?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_length() {
        // 32 bytes → 43 base64 chars without padding.
        let token = TokenGenerator::new().generate().unwrap();
        assert_eq!(token.len(), 43);
    }

    #[test]
    fn test_tokens_unique() {
        let generator = TokenGenerator::new();
        let tokens: HashSet<String> = (0..256).map(|_| generator.generate().unwrap()).collect();
        assert_eq!(tokens.len(), 256);
    }

    #[test]
    fn test_url_safe_alphabet() {
        let token = TokenGenerator::new().generate().unwrap();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }
}
