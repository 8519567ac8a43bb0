use async_trait::async_trait;

use super::AuthEvent;

/// Receives authentication events.
///
/// Implement this trait to react to logins, logouts and session expiry.
/// `handle` runs inline in the request that produced the event, so keep it
/// short or hand the work off to a task.
///
/// ```rust,ignore
/// use authcore::events::{AuthEvent, Listener};
/// use async_trait::async_trait;
///
/// struct ExpiryAuditListener {
///     sink: AuditSink,
/// }
///
/// #[async_trait]
/// impl Listener for ExpiryAuditListener {
///     async fn handle(&self, event: &AuthEvent) {
///         if let AuthEvent::SessionExpired { user_id, at } = event {
///             self.sink.record(user_id, *at).await;
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    async fn handle(&self, event: &AuthEvent);
}
