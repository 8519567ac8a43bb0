//! In-memory session storage.
//!
//! The only backend shipped with the crate. Sessions do not survive a restart.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::store::SessionStore;
use super::Session;
use crate::AuthError;

/// Stores sessions in a `HashMap` protected by a `RwLock`.
///
/// Cloning is cheap and every clone shares the same table, so one instance can
/// be handed to the registry while another is kept for inspection.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> AuthError {
    AuthError::StorageError("Lock poisoned".to_owned())
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session_id: &str, session: Session) -> Result<bool, AuthError> {
        let mut sessions = self.sessions.write().map_err(|_| poisoned())?;

        match sessions.entry(session_id.to_owned()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(session);
                Ok(true)
            }
        }
    }

    async fn get(&self, session_id: &str) -> Result<Option<Session>, AuthError> {
        let sessions = self.sessions.read().map_err(|_| poisoned())?;
        Ok(sessions.get(session_id).cloned())
    }

    async fn remove(&self, session_id: &str) -> Result<Option<Session>, AuthError> {
        Ok(self
            .sessions
            .write()
            .map_err(|_| poisoned())?
            .remove(session_id))
    }

    #[allow(clippy::significant_drop_tightening)]
    async fn remove_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, AuthError> {
        let mut sessions = self.sessions.write().map_err(|_| poisoned())?;

        let before_count = sessions.len();
        sessions.retain(|_, session| session.created_at >= cutoff);

        let removed = before_count.saturating_sub(sessions.len());
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }

    async fn len(&self) -> Result<usize, AuthError> {
        Ok(self.sessions.read().map_err(|_| poisoned())?.len())
    }
}
