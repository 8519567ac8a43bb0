use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// Opaque id; this is what sessions are bound to.
    pub id: String,
    pub username: String,
    /// Encoded credential, see [`Credential`](crate::Credential).
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(any(test, feature = "mocks"))]
impl AuthUser {
    pub fn mock_from_credentials(username: &str, hashed_password: &str) -> Self {
        AuthUser {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.to_owned(),
            hashed_password: hashed_password.to_owned(),
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError>;

    /// Stores a new user.
    ///
    /// Implementations should enforce username uniqueness themselves and
    /// return `AuthError::UserAlreadyExists` when it is violated; the
    /// pre-check in [`SignupAction`](crate::SignupAction) cannot close the race
    /// between two concurrent signups.
    async fn create_user(
        &self,
        username: &str,
        hashed_password: &str,
    ) -> Result<AuthUser, AuthError>;
}
