use chrono::Duration;

use super::clock::{Clock, SystemClock};
use super::config::SessionConfig;
use super::store::SessionStore;
use super::Session;
use crate::crypto::generate_session_id;
use crate::events::{dispatch, AuthEvent};
use crate::{AuthError, SecretString};

/// Attempts at finding an unused id before giving up. With 128+ bits per id a
/// second attempt should never be needed.
const MAX_ID_ATTEMPTS: usize = 3;

/// Issues, validates and revokes sessions.
///
/// The store is injected so the table is owned by whoever builds the
/// registry, not by a process global. Clone the store before handing it over
/// if you need to reach the table directly.
///
/// # Example
///
/// ```rust
/// use authcore::{AuthError, InMemorySessionStore, SessionRegistry};
///
/// # tokio_test_block_on(async {
/// let registry = SessionRegistry::new(InMemorySessionStore::new());
///
/// let id = registry.create("alice").await?;
/// assert_eq!(registry.validate(id.expose_secret()).await?.user_id, "alice");
///
/// registry.invalidate(id.expose_secret()).await?;
/// assert_eq!(
///     registry.validate(id.expose_secret()).await.unwrap_err(),
///     AuthError::Unauthenticated
/// );
/// # Ok::<(), AuthError>(())
/// # }).unwrap();
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct SessionRegistry<S, C = SystemClock> {
    store: S,
    clock: C,
    config: SessionConfig,
}

impl<S: SessionStore> SessionRegistry<S, SystemClock> {
    /// Creates a registry with the default 7-day TTL and the system clock.
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: SystemClock,
            config: SessionConfig::default(),
        }
    }

    /// Creates a registry with custom settings.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidConfig` if the settings fail
    /// [`SessionConfig::validate`].
    pub fn with_config(store: S, config: SessionConfig) -> Result<Self, AuthError> {
        config
            .validate()
            .map_err(|reason| AuthError::InvalidConfig(reason.to_owned()))?;

        Ok(Self {
            store,
            clock: SystemClock,
            config,
        })
    }
}

impl<S: SessionStore, C: Clock> SessionRegistry<S, C> {
    /// Replaces the time source.
    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> SessionRegistry<S, C2> {
        SessionRegistry {
            store: self.store,
            clock,
            config: self.config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    /// Starts a session for `user_id` and returns its opaque id.
    ///
    /// The id is URL-safe and never already present in the store.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "session_create", skip_all, err)
    )]
    pub async fn create(&self, user_id: &str) -> Result<SecretString, AuthError> {
        let session = Session::new(user_id, self.clock.now());

        for _ in 0..MAX_ID_ATTEMPTS {
            let session_id = generate_session_id(self.config.id_bytes);

            if self
                .store
                .insert(session_id.expose_secret(), session.clone())
                .await?
            {
                log::debug!(
                    target: "authcore::session",
                    "msg=\"session created\" user_id=\"{}\" session_prefix=\"{}\"",
                    user_id,
                    session_id.prefix(8)
                );
                return Ok(session_id);
            }

            log::warn!(target: "authcore::session", "msg=\"session id collision, regenerating\"");
        }

        Err(AuthError::StorageError(
            "could not allocate a unique session id".to_owned(),
        ))
    }

    /// Looks up a session.
    ///
    /// Unknown ids and expired sessions both fail with
    /// `AuthError::Unauthenticated`; an expired entry is removed on the way out
    /// so it can never validate again. A live session is returned as stored,
    /// without extending its lifetime.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "session_validate", skip_all, err)
    )]
    pub async fn validate(&self, session_id: &str) -> Result<Session, AuthError> {
        if session_id.is_empty() {
            return Err(AuthError::Unauthenticated);
        }

        let Some(session) = self.store.get(session_id).await? else {
            return Err(AuthError::Unauthenticated);
        };

        let now = self.clock.now();
        if session.is_expired(now, self.config.ttl) {
            self.store.remove(session_id).await?;

            log::info!(
                target: "authcore::session",
                "msg=\"session expired\" user_id=\"{}\" created_at=\"{}\"",
                session.user_id,
                session.created_at
            );

            dispatch(AuthEvent::SessionExpired {
                user_id: session.user_id,
                at: now,
            })
            .await;

            return Err(AuthError::Unauthenticated);
        }

        Ok(session)
    }

    /// Ends a session. Unknown ids are ignored.
    ///
    /// Returns the session that was removed, if any.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "session_invalidate", skip_all, err)
    )]
    pub async fn invalidate(&self, session_id: &str) -> Result<Option<Session>, AuthError> {
        self.store.remove(session_id).await
    }

    /// Removes every expired session from the store.
    ///
    /// Lookups already drop expired entries lazily; this reclaims the ones
    /// nobody asks about again.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "session_prune", skip_all, err)
    )]
    pub async fn prune_expired(&self) -> Result<u64, AuthError> {
        let now = self.clock.now();
        let pruned = self
            .store
            .remove_created_before(now - self.config.ttl)
            .await?;

        if pruned > 0 {
            dispatch(AuthEvent::SessionsPruned { count: pruned, at: now }).await;
        }

        Ok(pruned)
    }
}
