//! Password policy enforcement for new passwords.

use audithub_core::error::AppError;

/// Minimum password length.
const MIN_LENGTH: usize = 8;

/// Validates password strength.
#[derive(Debug, Clone, Default)]
pub struct PasswordValidator;

impl PasswordValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates a password against all policies.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.len() < MIN_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at least {MIN_LENGTH} characters long"
            )));
        }

        if !password.chars().any(|c| c.is_uppercase()) {
            return Err(AppError::validation(
                "Password must contain at least one uppercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_lowercase()) {
            return Err(AppError::validation(
                "Password must contain at least one lowercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        // Use zxcvbn for entropy check
        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < zxcvbn::Score::Three {
            return Err(AppError::validation(
                "Password is too weak. Please use a stronger password with more entropy.",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_short() {
        assert!(PasswordValidator::new().validate("Ab1").is_err());
    }

    #[test]
    fn test_missing_character_classes() {
        let validator = PasswordValidator::new();
        assert!(validator.validate("alllowercase1").is_err());
        assert!(validator.validate("ALLUPPERCASE1").is_err());
        assert!(validator.validate("NoDigitsHere").is_err());
    }

    #[test]
    fn test_weak_common_password_rejected() {
        assert!(PasswordValidator::new().validate("Password1").is_err());
    }

    #[test]
    fn test_strong_password_accepted() {
        assert!(
            PasswordValidator::new()
                .validate("tr4vessia-Quartzo")
                .is_ok()
        );
    }
}
