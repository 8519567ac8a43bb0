//! Session store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::Session;
use crate::AuthError;

/// Storage backend for the session table.
///
/// The registry owns the expiry policy; a store only keeps entries. Each
/// method must be atomic with respect to the others on the same id.
///
/// - [`InMemorySessionStore`](super::InMemorySessionStore): process-local `HashMap`
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Inserts a session under `session_id`.
    ///
    /// Returns `false` without touching the table if the id is already taken.
    async fn insert(&self, session_id: &str, session: Session) -> Result<bool, AuthError>;

    /// Finds a session by its id.
    async fn get(&self, session_id: &str) -> Result<Option<Session>, AuthError>;

    /// Removes a session, returning it if it was present.
    async fn remove(&self, session_id: &str) -> Result<Option<Session>, AuthError>;

    /// Removes every session created strictly before `cutoff`.
    ///
    /// Returns the number of sessions removed.
    async fn remove_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, AuthError>;

    /// Number of sessions currently stored, expired or not.
    async fn len(&self) -> Result<usize, AuthError>;
}
