//! Shape checks for signup input.
//!
//! The hasher accepts any string; these bound what reaches it.

pub mod password;
pub mod username;

pub use password::{validate_password, PasswordPolicy};
pub use username::validate_username;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    UsernameTooShort,
    UsernameTooLong,
    UsernameInvalidCharacter,
    PasswordEmpty,
    PasswordTooShort(usize),
    PasswordTooLong(usize),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UsernameTooShort => write!(
                f,
                "Username must be at least {} characters",
                username::MIN_USERNAME_LENGTH
            ),
            Self::UsernameTooLong => write!(
                f,
                "Username is too long (max {} characters)",
                username::MAX_USERNAME_LENGTH
            ),
            Self::UsernameInvalidCharacter => {
                write!(f, "Username cannot contain whitespace or control characters")
            }
            Self::PasswordEmpty => write!(f, "Password cannot be empty"),
            Self::PasswordTooShort(min) => write!(f, "Password must be at least {min} characters"),
            Self::PasswordTooLong(max) => write!(f, "Password is too long (max {max} characters)"),
        }
    }
}

impl std::error::Error for ValidationError {}
