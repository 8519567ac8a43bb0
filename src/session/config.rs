use chrono::Duration;

use crate::crypto::DEFAULT_SESSION_ID_BYTES;

/// Below this a session id no longer carries 128 bits of entropy.
pub const MIN_SESSION_ID_BYTES: usize = 16;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Absolute lifetime measured from creation.
    pub ttl: Duration,
    /// Random bytes per session id before URL-safe encoding.
    pub id_bytes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::days(7),
            id_bytes: DEFAULT_SESSION_ID_BYTES,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.ttl <= Duration::zero() {
            return Err("ttl must be positive");
        }
        if self.id_bytes < MIN_SESSION_ID_BYTES {
            return Err("id_bytes must be at least 16");
        }
        Ok(())
    }
}
