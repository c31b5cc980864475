use super::*;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::executor::block_on;
use futures::task::noop_waker;

use crate::net::client::{SessionChangeHandler, SessionClient, SessionSubscription};
use crate::net::types::{AuthError, Identity, ProfileDefaults, Role, Session};

// =============================================================
// Scripted backend client
// =============================================================

#[derive(Default)]
struct FakeInner {
    current: Option<Session>,
    default_role: Option<Role>,
    role_fetches: VecDeque<oneshot::Receiver<Option<Role>>>,
    role_fetch_count: usize,
    sign_in_err: Option<AuthError>,
    sign_up_err: Option<AuthError>,
    upsert_err: Option<AuthError>,
    sign_out_err: Option<AuthError>,
    profile_writes: Vec<ProfileDefaults>,
    handler: Option<SessionChangeHandler>,
}

/// Backend double. Role fetches either resolve immediately with
/// `default_role` or, when scripted via `queue_role_fetch`, stay pending
/// until the test fires the returned sender — that is how completion
/// interleavings are driven.
#[derive(Clone, Default)]
struct FakeClient {
    inner: Rc<RefCell<FakeInner>>,
}

impl FakeClient {
    fn with_session(session: Session, role: Role) -> Self {
        let fake = Self::default();
        fake.inner.borrow_mut().current = Some(session);
        fake.inner.borrow_mut().default_role = Some(role);
        fake
    }

    fn queue_role_fetch(&self) -> oneshot::Sender<Option<Role>> {
        let (tx, rx) = oneshot::channel();
        self.inner.borrow_mut().role_fetches.push_back(rx);
        tx
    }

    /// Deliver a push event the way the backend channel would.
    fn push(&self, session: Option<Session>) {
        let handler = self.inner.borrow().handler.clone();
        if let Some(handler) = handler {
            handler(session);
        }
    }

    fn role_fetch_count(&self) -> usize {
        self.inner.borrow().role_fetch_count
    }

    fn profile_writes(&self) -> Vec<ProfileDefaults> {
        self.inner.borrow().profile_writes.clone()
    }
}

impl SessionClient for FakeClient {
    async fn current_session(&self) -> Option<Session> {
        self.inner.borrow().current.clone()
    }

    fn subscribe_session_changes(&self, handler: SessionChangeHandler) -> SessionSubscription {
        self.inner.borrow_mut().handler = Some(handler);
        let inner = self.inner.clone();
        SessionSubscription::new(move || {
            inner.borrow_mut().handler = None;
        })
    }

    async fn sign_in_with_password(&self, _email: &str, _password: &str) -> Result<(), AuthError> {
        match self.inner.borrow().sign_in_err.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        full_name: &str,
    ) -> Result<Identity, AuthError> {
        if let Some(err) = self.inner.borrow().sign_up_err.clone() {
            return Err(err);
        }
        Ok(Identity {
            id: "u-new".to_owned(),
            email: Some(email.to_owned()),
            full_name: Some(full_name.to_owned()),
        })
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        match self.inner.borrow().sign_out_err.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn send_password_reset(&self, _email: &str) -> Result<(), AuthError> {
        Ok(())
    }

    async fn fetch_role_for_current_identity(&self) -> Option<Role> {
        self.inner.borrow_mut().role_fetch_count += 1;
        let scripted = self.inner.borrow_mut().role_fetches.pop_front();
        match scripted {
            Some(rx) => rx.await.ok().flatten(),
            None => self.inner.borrow().default_role.clone(),
        }
    }

    async fn upsert_profile(&self, defaults: &ProfileDefaults) -> Result<(), AuthError> {
        self.inner.borrow_mut().profile_writes.push(defaults.clone());
        match self.inner.borrow().upsert_err.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// =============================================================
// Harness helpers
// =============================================================

fn session(id: &str) -> Session {
    Session {
        access_token: format!("at-{id}"),
        refresh_token: format!("rt-{id}"),
        expires_at: 1_700_000_000,
        user: Identity {
            id: id.to_owned(),
            email: Some(format!("{id}@example.com")),
            full_name: None,
        },
    }
}

fn noop_spawner() -> Spawner {
    Rc::new(|_| {})
}

/// Spawner that queues futures for the test to drain, standing in for
/// `spawn_local` on the browser side.
fn queue_spawner() -> (Spawner, Rc<RefCell<Vec<LocalFuture>>>) {
    let queue: Rc<RefCell<Vec<LocalFuture>>> = Rc::new(RefCell::new(Vec::new()));
    let spawn_queue = queue.clone();
    let spawner: Spawner = Rc::new(move |fut| spawn_queue.borrow_mut().push(fut));
    (spawner, queue)
}

fn drain(queue: &Rc<RefCell<Vec<LocalFuture>>>) {
    loop {
        let pending: Vec<LocalFuture> = queue.borrow_mut().drain(..).collect();
        if pending.is_empty() {
            break;
        }
        for fut in pending {
            block_on(fut);
        }
    }
}

fn poll_once<F: std::future::Future + Unpin>(fut: &mut F) -> Poll<F::Output> {
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    std::pin::Pin::new(fut).poll(&mut cx)
}

// =============================================================
// Initialization
// =============================================================

#[test]
fn initialize_resolves_session_and_role() {
    let fake = FakeClient::with_session(session("u-1"), Role::Admin);
    let store = SessionStore::new(fake.clone(), noop_spawner());

    assert!(store.snapshot().loading);
    block_on(store.clone().initialize());

    let state = store.snapshot();
    assert!(!state.loading);
    assert_eq!(state.identity.as_ref().map(|i| i.id.as_str()), Some("u-1"));
    assert_eq!(state.role, Some(Role::Admin));
    assert_eq!(fake.role_fetch_count(), 1);
}

#[test]
fn initialize_without_session_clears_loading_and_skips_role_fetch() {
    let fake = FakeClient::default();
    let store = SessionStore::new(fake.clone(), noop_spawner());

    block_on(store.clone().initialize());

    let state = store.snapshot();
    assert!(!state.loading);
    assert!(state.identity.is_none());
    assert!(state.role.is_none());
    assert_eq!(fake.role_fetch_count(), 0);
}

#[test]
fn initialize_hooks_push_channel() {
    let fake = FakeClient::default();
    let (spawner, queue) = queue_spawner();
    let store = SessionStore::new(fake.clone(), spawner);
    fake.inner.borrow_mut().default_role = Some(Role::User);

    block_on(store.clone().initialize());
    fake.push(Some(session("u-7")));
    drain(&queue);

    let state = store.snapshot();
    assert_eq!(state.identity.as_ref().map(|i| i.id.as_str()), Some("u-7"));
    assert_eq!(state.role, Some(Role::User));
}

// =============================================================
// Overlapping resolutions (last event wins)
// =============================================================

#[test]
fn stale_role_fetch_result_is_discarded() {
    let fake = FakeClient::default();
    let store = SessionStore::new(fake.clone(), noop_spawner());

    let tx1 = fake.queue_role_fetch();
    let tx2 = fake.queue_role_fetch();

    let mut f1 = Box::pin(store.handle_session_change(Some(session("u-1"))));
    assert!(poll_once(&mut f1).is_pending());
    let mut f2 = Box::pin(store.handle_session_change(Some(session("u-2"))));
    assert!(poll_once(&mut f2).is_pending());

    // The later event's session is already visible; its role is not yet.
    let state = store.snapshot();
    assert_eq!(state.identity.as_ref().map(|i| i.id.as_str()), Some("u-2"));
    assert!(state.role.is_none());

    // Second resolution completes first.
    tx2.send(Some(Role::Admin)).expect("receiver alive");
    assert!(poll_once(&mut f2).is_ready());
    assert_eq!(store.snapshot().role, Some(Role::Admin));

    // The superseded resolution completes afterwards and must not land.
    tx1.send(Some(Role::User)).expect("receiver alive");
    assert!(poll_once(&mut f1).is_ready());

    let state = store.snapshot();
    assert_eq!(state.identity.as_ref().map(|i| i.id.as_str()), Some("u-2"));
    assert_eq!(state.role, Some(Role::Admin));
}

#[test]
fn final_state_matches_last_event_even_when_fetches_finish_in_order() {
    let fake = FakeClient::default();
    let store = SessionStore::new(fake.clone(), noop_spawner());

    let tx1 = fake.queue_role_fetch();
    let tx2 = fake.queue_role_fetch();

    let mut f1 = Box::pin(store.handle_session_change(Some(session("u-1"))));
    assert!(poll_once(&mut f1).is_pending());
    let mut f2 = Box::pin(store.handle_session_change(Some(session("u-2"))));
    assert!(poll_once(&mut f2).is_pending());

    // First resolution completes first; it is stale either way.
    tx1.send(Some(Role::User)).expect("receiver alive");
    assert!(poll_once(&mut f1).is_ready());
    tx2.send(Some(Role::Admin)).expect("receiver alive");
    assert!(poll_once(&mut f2).is_ready());

    let state = store.snapshot();
    assert_eq!(state.identity.as_ref().map(|i| i.id.as_str()), Some("u-2"));
    assert_eq!(state.role, Some(Role::Admin));
}

#[test]
fn failed_role_fetch_degrades_to_none_and_clears_loading() {
    let fake = FakeClient::default();
    let store = SessionStore::new(fake.clone(), noop_spawner());

    let tx = fake.queue_role_fetch();
    let mut fut = Box::pin(store.handle_session_change(Some(session("u-1"))));
    assert!(poll_once(&mut fut).is_pending());

    // Dropping the sender simulates a failed profile query.
    drop(tx);
    assert!(poll_once(&mut fut).is_ready());

    let state = store.snapshot();
    assert!(!state.loading);
    assert!(state.is_authenticated());
    assert!(state.role.is_none());
}

#[test]
fn loading_does_not_reoscillate_on_later_events() {
    let fake = FakeClient::with_session(session("u-1"), Role::User);
    let store = SessionStore::new(fake.clone(), noop_spawner());
    block_on(store.clone().initialize());

    let _tx = fake.queue_role_fetch();
    let mut fut = Box::pin(store.handle_session_change(Some(session("u-2"))));
    assert!(poll_once(&mut fut).is_pending());

    // Mid-resolution for the new session, loading stays cleared.
    assert!(!store.snapshot().loading);
}

// =============================================================
// Sign-out
// =============================================================

#[test]
fn sign_out_clears_state_synchronously() {
    let fake = FakeClient::with_session(session("u-1"), Role::Admin);
    let store = SessionStore::new(fake.clone(), noop_spawner());
    block_on(store.clone().initialize());
    assert!(store.snapshot().is_authenticated());

    // The fake never sends the sign-out push; the store must not need it.
    block_on(store.sign_out()).expect("sign out");

    let state = store.snapshot();
    assert!(state.identity.is_none());
    assert!(state.session.is_none());
    assert!(state.role.is_none());
    assert!(!state.loading);
}

#[test]
fn sign_out_supersedes_in_flight_resolution() {
    let fake = FakeClient::default();
    let store = SessionStore::new(fake.clone(), noop_spawner());

    let tx = fake.queue_role_fetch();
    let mut fut = Box::pin(store.handle_session_change(Some(session("u-1"))));
    assert!(poll_once(&mut fut).is_pending());

    block_on(store.sign_out()).expect("sign out");

    tx.send(Some(Role::Admin)).expect("receiver alive");
    assert!(poll_once(&mut fut).is_ready());

    assert!(!store.snapshot().is_authenticated());
    assert!(store.snapshot().role.is_none());
}

#[test]
fn sign_out_when_already_signed_out_is_ok() {
    let fake = FakeClient::default();
    let store = SessionStore::new(fake.clone(), noop_spawner());
    block_on(store.clone().initialize());

    assert_eq!(block_on(store.sign_out()), Ok(()));
    assert!(!store.snapshot().is_authenticated());
}

// =============================================================
// Sign-in
// =============================================================

#[test]
fn sign_in_does_not_mutate_state_directly() {
    let fake = FakeClient::default();
    let store = SessionStore::new(fake.clone(), noop_spawner());

    block_on(store.sign_in("a@b.com", "pw")).expect("sign in");

    // Convergence is the push channel's job.
    assert!(!store.snapshot().is_authenticated());
}

#[test]
fn sign_in_surfaces_typed_failure() {
    let fake = FakeClient::default();
    fake.inner.borrow_mut().sign_in_err = Some(AuthError::CredentialsRejected);
    let store = SessionStore::new(fake.clone(), noop_spawner());

    let result = block_on(store.sign_in("a@b.com", "wrong"));
    assert_eq!(result, Err(AuthError::CredentialsRejected));
}

// =============================================================
// Sign-up
// =============================================================

#[test]
fn sign_up_writes_default_user_profile() {
    let fake = FakeClient::default();
    let store = SessionStore::new(fake.clone(), noop_spawner());

    let identity = block_on(store.sign_up("a@b.com", "pw", "Ada")).expect("sign up");

    assert_eq!(identity.id, "u-new");
    let writes = fake.profile_writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].id, "u-new");
    assert_eq!(writes[0].full_name, "Ada");
    assert_eq!(writes[0].role, "user");
}

#[test]
fn sign_up_reports_failure_when_profile_write_fails() {
    let fake = FakeClient::default();
    fake.inner.borrow_mut().upsert_err = Some(AuthError::Network);
    let (spawner, queue) = queue_spawner();
    let store = SessionStore::new(fake.clone(), spawner);
    block_on(store.clone().initialize());

    let result = block_on(store.sign_up("a@b.com", "pw", "Ada"));
    assert_eq!(result, Err(AuthError::ProfileWrite));

    // The account exists on the backend, but the store only learns about
    // it if a session push arrives independently.
    assert!(!store.snapshot().is_authenticated());
    fake.push(Some(session("u-new")));
    drain(&queue);
    assert!(store.snapshot().is_authenticated());
}

#[test]
fn sign_up_propagates_account_creation_failure() {
    let fake = FakeClient::default();
    fake.inner.borrow_mut().sign_up_err = Some(AuthError::Unknown("email taken".to_owned()));
    let store = SessionStore::new(fake.clone(), noop_spawner());

    let result = block_on(store.sign_up("a@b.com", "pw", "Ada"));
    assert_eq!(result, Err(AuthError::Unknown("email taken".to_owned())));
    assert!(fake.profile_writes().is_empty());
}

// =============================================================
// Teardown and listeners
// =============================================================

#[test]
fn teardown_detaches_push_channel_and_freezes_state() {
    let fake = FakeClient::default();
    let (spawner, queue) = queue_spawner();
    let store = SessionStore::new(fake.clone(), spawner);
    block_on(store.clone().initialize());

    store.teardown();

    // The backend handler is gone, so pushes no longer schedule work.
    fake.push(Some(session("u-1")));
    assert!(queue.borrow().is_empty());

    // A direct event after teardown is a no-op as well.
    block_on(store.handle_session_change(Some(session("u-1"))));
    assert!(!store.snapshot().is_authenticated());
}

#[test]
fn listeners_observe_changes_until_unsubscribed() {
    let fake = FakeClient::default();
    fake.inner.borrow_mut().default_role = Some(Role::User);
    let store = SessionStore::new(fake.clone(), noop_spawner());

    let seen: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let id = store.subscribe(move |state| sink.borrow_mut().push(state.is_authenticated()));

    block_on(store.handle_session_change(Some(session("u-1"))));
    assert_eq!(seen.borrow().last(), Some(&true));
    let count = seen.borrow().len();

    store.unsubscribe(id);
    block_on(store.handle_session_change(None));
    assert_eq!(seen.borrow().len(), count);
}
