use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Length bounds for passwords, measured in characters.
///
/// # Examples
///
/// ```
/// use authcore::validators::PasswordPolicy;
///
/// // Default policy: 1-100 characters
/// let policy = PasswordPolicy::default();
/// assert!(policy.validate("pw").is_ok());
///
/// let policy = PasswordPolicy::new().min(12);
/// assert!(policy.validate("short").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    /// Minimum password length (default: 1)
    pub min_length: usize,
    /// Maximum password length (default: 100)
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 100,
        }
    }
}

impl PasswordPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn min(mut self, len: usize) -> Self {
        self.min_length = len;
        self
    }

    #[must_use]
    pub fn max(mut self, len: usize) -> Self {
        self.max_length = len;
        self
    }

    /// Validates a password against this policy.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the password is empty or out of bounds.
    pub fn validate(&self, password: &str) -> Result<(), ValidationError> {
        if password.is_empty() {
            return Err(ValidationError::PasswordEmpty);
        }

        let length = password.chars().count();

        if length < self.min_length {
            return Err(ValidationError::PasswordTooShort(self.min_length));
        }

        if length > self.max_length {
            return Err(ValidationError::PasswordTooLong(self.max_length));
        }

        Ok(())
    }
}

/// Validates a password using the default policy (1-100 characters).
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    PasswordPolicy::default().validate(password)
}
