use crate::session::{Clock, Session, SessionRegistry, SessionStore, SystemClock};
use crate::AuthError;

/// Resolves the session id a client presented into the session it names.
///
/// Run on every request that needs an identity. The id is optional because
/// transports such as cookies may simply not carry one.
pub struct AuthenticateAction<S, C = SystemClock> {
    sessions: SessionRegistry<S, C>,
}

impl<S: SessionStore, C: Clock> AuthenticateAction<S, C> {
    pub fn new(sessions: SessionRegistry<S, C>) -> Self {
        AuthenticateAction { sessions }
    }

    /// # Returns
    ///
    /// - `Ok(session)` - live session
    /// - `Err(AuthError::Unauthenticated)` - no id, unknown id, or expired
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "authenticate", skip_all, err)
    )]
    pub async fn execute(&self, session_id: Option<&str>) -> Result<Session, AuthError> {
        let session_id = session_id.ok_or(AuthError::Unauthenticated)?;
        self.sessions.validate(session_id).await
    }
}
