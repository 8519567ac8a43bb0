//! Authentication core for a small registration/login backend.
//!
//! Two pieces do the real work:
//!
//! - [`crypto`]: PBKDF2-HMAC-SHA256 password credentials in the
//!   `pbkdf2_sha256$<iterations>$<salt>$<key>` format.
//! - [`session`]: opaque server-side sessions with a fixed lifetime, kept in an
//!   injectable [`SessionStore`](session::SessionStore).
//!
//! The [`actions`] wire them to a [`UserRepository`] supplied by the caller.

pub mod actions;
pub mod config;
pub mod crypto;
pub mod events;
pub mod repository;
pub mod secret;
pub mod session;
pub mod validators;

use std::fmt;

pub use actions::{
    AuthenticateAction, LoginAction, LogoutAction, PruneExpiredSessionsAction, SignupAction,
};
pub use config::{AuthConfig, HasherConfig};
pub use crypto::{Credential, PasswordHasher, Pbkdf2Hasher};
pub use events::register_event_listeners;
pub use repository::{AuthUser, UserRepository};
pub use secret::SecretString;
pub use session::{
    Clock, InMemorySessionStore, Session, SessionConfig, SessionRegistry, SessionStore,
    SystemClock,
};
pub use validators::ValidationError;

#[cfg(any(test, feature = "mocks"))]
pub use repository::MockUserRepository;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// The stored credential names a hashing scheme this build does not implement.
    UnsupportedAlgorithm(String),
    /// The stored credential does not parse into its four fields.
    MalformedCredential(String),
    /// Wrong password, unknown user, or a missing/expired session.
    Unauthenticated,
    UserAlreadyExists,
    InvalidUsername(ValidationError),
    InvalidPassword(ValidationError),
    PasswordHashError,
    InvalidConfig(String),
    StorageError(String),
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::UnsupportedAlgorithm(algorithm) => {
                write!(f, "Unsupported password hashing algorithm: {algorithm}")
            }
            AuthError::MalformedCredential(reason) => write!(f, "Malformed credential: {reason}"),
            AuthError::Unauthenticated => write!(f, "Unauthenticated"),
            AuthError::UserAlreadyExists => write!(f, "User already exists"),
            AuthError::InvalidUsername(err) => write!(f, "Invalid username: {err}"),
            AuthError::InvalidPassword(err) => write!(f, "Invalid password: {err}"),
            AuthError::PasswordHashError => write!(f, "Failed to hash password"),
            AuthError::InvalidConfig(reason) => write!(f, "Invalid configuration: {reason}"),
            AuthError::StorageError(msg) => write!(f, "Storage error: {msg}"),
        }
    }
}

impl AuthError {
    /// True for failures that indicate corrupted or mismatched stored data
    /// rather than a routine rejection.
    pub fn is_credential_integrity_error(&self) -> bool {
        matches!(
            self,
            AuthError::UnsupportedAlgorithm(_) | AuthError::MalformedCredential(_)
        )
    }
}
