use chrono::Utc;

use crate::events::{dispatch, AuthEvent};
use crate::session::{Clock, SessionRegistry, SessionStore, SystemClock};
use crate::AuthError;

pub struct LogoutAction<S, C = SystemClock> {
    sessions: SessionRegistry<S, C>,
}

impl<S: SessionStore, C: Clock> LogoutAction<S, C> {
    pub fn new(sessions: SessionRegistry<S, C>) -> Self {
        LogoutAction { sessions }
    }

    /// Ends the session behind `session_id`.
    ///
    /// Logging out twice, or with an id that was never issued, is not an error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "logout", skip_all, err)
    )]
    pub async fn execute(&self, session_id: &str) -> Result<(), AuthError> {
        let Some(session) = self.sessions.invalidate(session_id).await? else {
            return Ok(());
        };

        dispatch(AuthEvent::LogoutSuccess {
            user_id: session.user_id.clone(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "authcore",
            "msg=\"logout success\" user_id=\"{}\"",
            session.user_id
        );

        Ok(())
    }
}
