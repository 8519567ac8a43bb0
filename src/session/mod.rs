//! Server-side sessions.
//!
//! A session is an opaque random id mapped to the user it authenticates and
//! the moment it was created. It lives for a fixed TTL from creation; there is
//! no sliding renewal. Expired entries are dropped the first time they are
//! looked up, or in bulk by [`SessionRegistry::prune_expired`].

mod clock;
mod config;
mod memory_store;
mod registry;
mod store;
mod sweeper;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "mocks"))]
pub use clock::MockClock;
pub use clock::{Clock, SystemClock};
pub use config::SessionConfig;
pub use memory_store::InMemorySessionStore;
pub use registry::SessionRegistry;
pub use store::SessionStore;
pub use sweeper::spawn_session_sweeper;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            created_at,
        }
    }

    /// Expired once strictly more than `ttl` has passed since creation.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at > ttl
    }

    pub fn expires_at(&self, ttl: Duration) -> DateTime<Utc> {
        self.created_at + ttl
    }
}
