use std::time::Duration;

use tokio::task::JoinHandle;

use super::clock::Clock;
use super::registry::SessionRegistry;
use super::store::SessionStore;

/// Starts a background task that prunes expired sessions every `period`.
///
/// Expiry is still enforced on lookup without it; the sweeper only bounds
/// memory held by sessions that are never presented again. Abort the
/// returned handle to stop it.
///
/// Must be called from within a tokio runtime.
pub fn spawn_session_sweeper<S, C>(
    registry: SessionRegistry<S, C>,
    period: Duration,
) -> JoinHandle<()>
where
    S: SessionStore + 'static,
    C: Clock + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);

        loop {
            ticker.tick().await;

            match registry.prune_expired().await {
                Ok(0) => {}
                Ok(pruned) => {
                    log::info!(
                        target: "authcore::session",
                        "msg=\"expired sessions pruned\" count={pruned}"
                    );
                }
                Err(e) => {
                    log::error!(
                        target: "authcore::session",
                        "msg=\"session sweep failed\" error=\"{e}\""
                    );
                }
            }
        }
    })
}
