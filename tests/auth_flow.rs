//! End-to-end registration, login and session lifecycle against the mock
//! user store. Run with: `cargo test --features mocks --test auth_flow`

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use authcore::session::MockClock;
use authcore::{
    AuthConfig, AuthError, AuthenticateAction, Clock, InMemorySessionStore, LoginAction,
    LogoutAction, MockUserRepository, PasswordHasher, PruneExpiredSessionsAction, Session,
    SessionRegistry, SessionStore, SignupAction,
};
use chrono::Duration;

struct Harness {
    signup: SignupAction<MockUserRepository, dyn PasswordHasher>,
    login: LoginAction<MockUserRepository, dyn PasswordHasher, InMemorySessionStore, MockClock>,
    authenticate: AuthenticateAction<InMemorySessionStore, MockClock>,
    logout: LogoutAction<InMemorySessionStore, MockClock>,
    prune: PruneExpiredSessionsAction<InMemorySessionStore, MockClock>,
    store: InMemorySessionStore,
    clock: MockClock,
}

fn harness() -> Harness {
    let config = AuthConfig::development();
    let hasher: Arc<dyn PasswordHasher> = Arc::new(config.password_hasher());

    let users = MockUserRepository::new();
    let store = InMemorySessionStore::new();
    let clock = MockClock::default();
    let sessions = SessionRegistry::with_config(store.clone(), config.session.clone())
        .unwrap()
        .with_clock(clock.clone());

    Harness {
        signup: SignupAction::new(users.clone(), Arc::clone(&hasher)),
        login: LoginAction::new(users, hasher, sessions.clone()),
        authenticate: AuthenticateAction::new(sessions.clone()),
        logout: LogoutAction::new(sessions.clone()),
        prune: PruneExpiredSessionsAction::new(sessions),
        store,
        clock,
    }
}

#[tokio::test]
async fn register_login_authenticate_logout() {
    let h = harness();

    let user = h.signup.execute("alice", "wonderland").await.unwrap();
    let (logged_in, session_id) = h.login.execute("alice", "wonderland").await.unwrap();
    assert_eq!(logged_in.id, user.id);

    let session = h
        .authenticate
        .execute(Some(session_id.expose_secret()))
        .await
        .unwrap();
    assert_eq!(session.user_id, user.id);

    h.logout.execute(session_id.expose_secret()).await.unwrap();

    let result = h.authenticate.execute(Some(session_id.expose_secret())).await;
    assert_eq!(result.unwrap_err(), AuthError::Unauthenticated);

    // logging out again is harmless
    h.logout.execute(session_id.expose_secret()).await.unwrap();
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let h = harness();

    h.signup.execute("alice", "first").await.unwrap();
    let result = h.signup.execute("alice", "second").await;

    assert_eq!(result.unwrap_err(), AuthError::UserAlreadyExists);

    // the original password still works
    assert!(h.login.execute("alice", "first").await.is_ok());
    assert!(h.login.execute("alice", "second").await.is_err());
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() {
    let h = harness();
    h.signup.execute("alice", "wonderland").await.unwrap();

    let wrong = h.login.execute("alice", "looking-glass").await.unwrap_err();
    let unknown = h.login.execute("mallory", "wonderland").await.unwrap_err();

    assert_eq!(wrong, unknown);
    assert_eq!(wrong, AuthError::Unauthenticated);
    assert_eq!(h.store.len().await.unwrap(), 0);
}

#[tokio::test]
async fn session_expires_after_seven_days_and_is_removed() {
    let h = harness();
    h.signup.execute("alice", "wonderland").await.unwrap();
    let (_, session_id) = h.login.execute("alice", "wonderland").await.unwrap();
    let id = session_id.expose_secret();

    h.clock.advance(Duration::days(7));
    assert!(h.authenticate.execute(Some(id)).await.is_ok());

    h.clock.advance(Duration::days(1));
    assert_eq!(
        h.authenticate.execute(Some(id)).await.unwrap_err(),
        AuthError::Unauthenticated
    );
    assert!(h.store.get(id).await.unwrap().is_none());
    assert_eq!(
        h.authenticate.execute(Some(id)).await.unwrap_err(),
        AuthError::Unauthenticated
    );
}

#[tokio::test]
async fn session_created_eight_days_ago_is_rejected_twice() {
    let h = harness();
    let now = h.clock.now();
    h.store
        .insert("backdated", Session::new("alice", now - Duration::days(8)))
        .await
        .unwrap();

    for _ in 0..2 {
        assert_eq!(
            h.authenticate.execute(Some("backdated")).await.unwrap_err(),
            AuthError::Unauthenticated
        );
    }
    assert_eq!(h.store.len().await.unwrap(), 0);
}

#[tokio::test]
async fn never_issued_id_is_unauthenticated() {
    let h = harness();

    for id in ["", "not-a-session", "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"] {
        assert_eq!(
            h.authenticate.execute(Some(id)).await.unwrap_err(),
            AuthError::Unauthenticated
        );
    }
}

#[tokio::test]
async fn prune_reclaims_abandoned_sessions() {
    let h = harness();
    h.signup.execute("alice", "wonderland").await.unwrap();

    for _ in 0..3 {
        h.login.execute("alice", "wonderland").await.unwrap();
    }
    h.clock.advance(Duration::days(10));
    let (_, fresh) = h.login.execute("alice", "wonderland").await.unwrap();

    assert_eq!(h.prune.execute().await.unwrap(), 3);
    assert_eq!(h.store.len().await.unwrap(), 1);
    assert!(h
        .authenticate
        .execute(Some(fresh.expose_secret()))
        .await
        .is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_session_traffic() {
    let store = InMemorySessionStore::new();
    let sessions = SessionRegistry::new(store.clone());

    let tasks: Vec<_> = (0..64)
        .map(|i| {
            let sessions = sessions.clone();
            tokio::spawn(async move {
                let user_id = format!("user-{i}");
                let id = sessions.create(&user_id).await.unwrap();

                let session = sessions.validate(id.expose_secret()).await.unwrap();
                assert_eq!(session.user_id, user_id);

                sessions.invalidate(id.expose_secret()).await.unwrap();
                assert!(sessions.validate(id.expose_secret()).await.is_err());
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(store.len().await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_logins_each_hash_once() {
    let h = Arc::new(harness());
    h.signup.execute("alice", "wonderland").await.unwrap();

    let logins: Vec<_> = (0..8)
        .map(|_| {
            let h = Arc::clone(&h);
            tokio::spawn(async move { h.login.execute("alice", "wonderland").await })
        })
        .collect();

    for login in logins {
        assert!(login.await.unwrap().is_ok());
    }

    assert_eq!(h.store.len().await.unwrap(), 8);
}
