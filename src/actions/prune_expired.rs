//! Run periodically to reclaim sessions that expired without ever being
//! presented again. See also [`spawn_session_sweeper`](crate::session::spawn_session_sweeper).

use crate::session::{Clock, SessionRegistry, SessionStore, SystemClock};
use crate::AuthError;

pub struct PruneExpiredSessionsAction<S, C = SystemClock> {
    sessions: SessionRegistry<S, C>,
}

impl<S: SessionStore, C: Clock> PruneExpiredSessionsAction<S, C> {
    pub fn new(sessions: SessionRegistry<S, C>) -> Self {
        Self { sessions }
    }

    /// Removes all expired sessions.
    ///
    /// # Returns
    ///
    /// - `Ok(count)` - number of sessions removed
    /// - `Err(_)` - storage errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), name = "prune_expired")
    )]
    pub async fn execute(&self) -> Result<u64, AuthError> {
        let pruned = self.sessions.prune_expired().await?;

        log::info!(
            target: "authcore",
            "msg=\"sessions pruned\" count={pruned}"
        );

        Ok(pruned)
    }
}
