use std::sync::Arc;

use chrono::Utc;

use crate::crypto::{hash_password, PasswordHasher};
use crate::events::{dispatch, AuthEvent};
use crate::validators::{validate_username, PasswordPolicy};
use crate::{AuthError, AuthUser, SecretString, UserRepository};

pub struct SignupAction<U, H: ?Sized> {
    users: U,
    hasher: Arc<H>,
    password_policy: PasswordPolicy,
}

impl<U, H> SignupAction<U, H>
where
    U: UserRepository,
    H: PasswordHasher + ?Sized + 'static,
{
    pub fn new(users: U, hasher: Arc<H>) -> Self {
        SignupAction {
            users,
            hasher,
            password_policy: PasswordPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.password_policy = policy;
        self
    }

    /// Registers a new user.
    ///
    /// The password is hashed on the blocking pool; only the encoded
    /// credential reaches the repository.
    ///
    /// # Returns
    ///
    /// - `Ok(user)` - the stored user
    /// - `Err(AuthError::UserAlreadyExists)` - username taken
    /// - `Err(AuthError::InvalidUsername | InvalidPassword)` - input out of bounds
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "signup", skip_all, err)
    )]
    pub async fn execute(&self, username: &str, password: &str) -> Result<AuthUser, AuthError> {
        validate_username(username).map_err(AuthError::InvalidUsername)?;
        self.password_policy
            .validate(password)
            .map_err(AuthError::InvalidPassword)?;

        if self.users.find_user_by_username(username).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let hashed = hash_password(Arc::clone(&self.hasher), SecretString::new(password)).await?;
        let user = self.users.create_user(username, &hashed).await?;

        dispatch(AuthEvent::UserRegistered {
            user_id: user.id.clone(),
            username: user.username.clone(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "authcore",
            "msg=\"user registered\" user_id=\"{}\"",
            user.id
        );

        Ok(user)
    }
}
