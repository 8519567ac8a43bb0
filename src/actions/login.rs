use std::sync::Arc;

use chrono::Utc;

use crate::crypto::{verify_password, PasswordHasher};
use crate::events::{dispatch, AuthEvent};
use crate::session::{Clock, SessionRegistry, SessionStore, SystemClock};
use crate::{AuthError, AuthUser, SecretString, UserRepository};

pub struct LoginAction<U, H: ?Sized, S, C = SystemClock> {
    users: U,
    hasher: Arc<H>,
    sessions: SessionRegistry<S, C>,
}

impl<U, H, S, C> LoginAction<U, H, S, C>
where
    U: UserRepository,
    H: PasswordHasher + ?Sized + 'static,
    S: SessionStore,
    C: Clock,
{
    pub fn new(users: U, hasher: Arc<H>, sessions: SessionRegistry<S, C>) -> Self {
        LoginAction {
            users,
            hasher,
            sessions,
        }
    }

    /// Checks a username/password pair and opens a session.
    ///
    /// # Returns
    ///
    /// - `Ok((user, session_id))` - the caller hands `session_id` to the client
    /// - `Err(AuthError::Unauthenticated)` - unknown user or wrong password;
    ///   the two are deliberately indistinguishable
    /// - `Err(AuthError::UnsupportedAlgorithm | MalformedCredential)` - the
    ///   stored credential is unusable; an operational problem, not a bad login
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "login", skip_all, err)
    )]
    pub async fn execute(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(AuthUser, SecretString), AuthError> {
        let Some(user) = self.users.find_user_by_username(username).await? else {
            self.reject(username, "unknown user").await;
            return Err(AuthError::Unauthenticated);
        };

        let verified = match verify_password(
            Arc::clone(&self.hasher),
            SecretString::new(password),
            user.hashed_password.clone(),
        )
        .await
        {
            Ok(verified) => verified,
            Err(e) => {
                log::error!(
                    target: "authcore",
                    "msg=\"stored credential unusable\" user_id=\"{}\" error=\"{e}\"",
                    user.id
                );
                return Err(e);
            }
        };

        if !verified {
            self.reject(username, "invalid password").await;
            return Err(AuthError::Unauthenticated);
        }

        let session_id = self.sessions.create(&user.id).await?;

        dispatch(AuthEvent::LoginSuccess {
            user_id: user.id.clone(),
            username: user.username.clone(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "authcore",
            "msg=\"login success\" user_id=\"{}\"",
            user.id
        );

        Ok((user, session_id))
    }

    async fn reject(&self, username: &str, reason: &str) {
        log::info!(
            target: "authcore",
            "msg=\"login failed\" username=\"{username}\" reason=\"{reason}\""
        );

        dispatch(AuthEvent::LoginFailed {
            username: username.to_owned(),
            reason: reason.to_owned(),
            at: Utc::now(),
        })
        .await;
    }
}
