use chrono::{DateTime, Utc};

/// Authentication events emitted by actions and the session registry.
///
/// If no listeners are registered they are dropped. Register listeners via
/// [`register_event_listeners`](crate::register_event_listeners).
#[derive(Debug, Clone)]
pub enum AuthEvent {
    // user lifecycle
    UserRegistered {
        user_id: String,
        username: String,
        at: DateTime<Utc>,
    },

    // authentication
    LoginSuccess {
        user_id: String,
        username: String,
        at: DateTime<Utc>,
    },
    LoginFailed {
        username: String,
        reason: String,
        at: DateTime<Utc>,
    },
    LogoutSuccess {
        user_id: String,
        at: DateTime<Utc>,
    },

    // session
    SessionExpired {
        user_id: String,
        at: DateTime<Utc>,
    },
    SessionsPruned {
        count: u64,
        at: DateTime<Utc>,
    },
}

impl AuthEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserRegistered { .. } => "user.registered",
            Self::LoginSuccess { .. } => "auth.login.success",
            Self::LoginFailed { .. } => "auth.login.failed",
            Self::LogoutSuccess { .. } => "auth.logout.success",
            Self::SessionExpired { .. } => "auth.session.expired",
            Self::SessionsPruned { .. } => "auth.session.pruned",
        }
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::UserRegistered { at, .. }
            | Self::LoginSuccess { at, .. }
            | Self::LoginFailed { at, .. }
            | Self::LogoutSuccess { at, .. }
            | Self::SessionExpired { at, .. }
            | Self::SessionsPruned { at, .. } => *at,
        }
    }
}
