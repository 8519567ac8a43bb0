use std::sync::OnceLock;

use super::{AuthEvent, Listener};

static REGISTRY: OnceLock<EventRegistry> = OnceLock::new();

/// Listeners registered for the lifetime of the process.
///
/// Built once through [`register_event_listeners`]; read-only afterwards, so
/// dispatch needs no locking.
#[derive(Default)]
pub struct EventRegistry {
    listeners: Vec<Box<dyn Listener>>,
}

impl EventRegistry {
    /// Adds a listener. Listeners run in registration order.
    pub fn listen(&mut self, listener: impl Listener) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    async fn dispatch(&self, event: &AuthEvent) {
        for listener in &self.listeners {
            listener.handle(event).await;
        }
    }
}

/// Configures the process-wide listeners.
///
/// Only the first call takes effect; later calls are logged and ignored.
///
/// ```rust,ignore
/// use authcore::register_event_listeners;
/// use authcore::events::listeners::LoggingListener;
///
/// register_event_listeners(|registry| {
///     registry.listen(LoggingListener::new());
/// });
/// ```
pub fn register_event_listeners<F>(f: F)
where
    F: FnOnce(&mut EventRegistry),
{
    let mut registry = EventRegistry::default();
    f(&mut registry);

    let count = registry.len();
    if REGISTRY.set(registry).is_err() {
        log::warn!(
            target: "authcore::events",
            "msg=\"register_event_listeners called more than once, ignoring\""
        );
    } else {
        log::debug!(target: "authcore::events", "msg=\"event listeners registered\" count={count}");
    }
}

/// Sends an event to every registered listener; a no-op before registration.
pub async fn dispatch(event: AuthEvent) {
    if let Some(registry) = REGISTRY.get() {
        registry.dispatch(&event).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;

    struct Counter(Arc<AtomicUsize>);

    #[async_trait]
    impl Listener for Counter {
        async fn handle(&self, _event: &AuthEvent) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_local_registry_dispatches_in_order() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut registry = EventRegistry::default();
        registry
            .listen(Counter(Arc::clone(&hits)))
            .listen(Counter(Arc::clone(&hits)));

        assert_eq!(registry.len(), 2);

        registry
            .dispatch(&AuthEvent::SessionsPruned {
                count: 1,
                at: Utc::now(),
            })
            .await;

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_global_dispatch_without_listeners_is_noop() {
        // other tests never register globally, so this only checks it returns
        dispatch(AuthEvent::LogoutSuccess {
            user_id: "u1".to_owned(),
            at: Utc::now(),
        })
        .await;
    }
}
