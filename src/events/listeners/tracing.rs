use async_trait::async_trait;

use crate::events::{AuthEvent, Listener};

/// Emits authentication events as `tracing` events.
///
/// Requires the `tracing` feature to be enabled.
///
/// ```rust,ignore
/// use authcore::register_event_listeners;
/// use authcore::events::listeners::TracingListener;
///
/// register_event_listeners(|registry| {
///     registry.listen(TracingListener);
/// });
/// ```
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &AuthEvent) {
        match event {
            AuthEvent::LoginFailed {
                username, reason, ..
            } => {
                tracing::warn!(
                    target: "authcore::events",
                    event_name = event.name(),
                    username = %username,
                    reason = %reason,
                    "auth event"
                );
            }
            AuthEvent::SessionsPruned { count, .. } => {
                tracing::info!(
                    target: "authcore::events",
                    event_name = event.name(),
                    count = *count,
                    "auth event"
                );
            }
            _ => {
                tracing::info!(
                    target: "authcore::events",
                    event_name = event.name(),
                    at = %event.timestamp(),
                    "auth event"
                );
            }
        }
    }
}
