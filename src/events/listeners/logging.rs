use async_trait::async_trait;

use crate::events::{AuthEvent, Listener};

/// Logs authentication events through the `log` crate.
///
/// Failed logins are always logged at `Warn` or above; everything else uses
/// the configured level.
///
/// ```rust,ignore
/// use authcore::register_event_listeners;
/// use authcore::events::listeners::LoggingListener;
///
/// register_event_listeners(|registry| {
///     registry.listen(LoggingListener::new());
/// });
/// ```
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    /// Creates a new logging listener at INFO level.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }

    fn level_for(&self, event: &AuthEvent) -> log::Level {
        match event {
            AuthEvent::LoginFailed { .. } => self.level.min(log::Level::Warn),
            _ => self.level,
        }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

/// logfmt-style fields for an event; never includes secrets.
fn fields(event: &AuthEvent) -> String {
    match event {
        AuthEvent::UserRegistered {
            user_id, username, ..
        }
        | AuthEvent::LoginSuccess {
            user_id, username, ..
        } => format!("user_id=\"{user_id}\" username=\"{username}\""),
        AuthEvent::LoginFailed {
            username, reason, ..
        } => format!("username=\"{username}\" reason=\"{reason}\""),
        AuthEvent::LogoutSuccess { user_id, .. } | AuthEvent::SessionExpired { user_id, .. } => {
            format!("user_id=\"{user_id}\"")
        }
        AuthEvent::SessionsPruned { count, .. } => format!("count={count}"),
    }
}

#[async_trait]
impl Listener for LoggingListener {
    async fn handle(&self, event: &AuthEvent) {
        log::log!(
            target: "authcore::events",
            self.level_for(event),
            "event={} at=\"{}\" {}",
            event.name(),
            event.timestamp(),
            fields(event)
        );
    }
}
