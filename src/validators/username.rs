use super::ValidationError;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 16;

/// Usernames are 3 to 16 characters with no whitespace or control characters.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let length = username.chars().count();

    if length < MIN_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooShort);
    }

    if length > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }

    if username
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(ValidationError::UsernameInvalidCharacter);
    }

    Ok(())
}
