//! The session store: single source of truth for authentication state.
//!
//! DESIGN
//! ======
//! One `SessionStore` is created at startup. It owns the only mutable
//! `AuthState`, fetches the current session and role on `initialize`,
//! and listens on the backend's push channel for the rest of its life.
//! Interested parties register listeners (`subscribe`) and receive the
//! state after every change; `app.rs` bridges that into an `RwSignal`
//! for the component tree.
//!
//! ORDERING
//! ========
//! Session resolutions overlap: a role fetch for session S1 may still be
//! in flight when the push channel delivers S2. Every resolution takes a
//! fresh epoch before its first await and re-checks it after each await;
//! a completion whose epoch is no longer current is discarded, so the
//! externally visible state always reflects the most recently initiated
//! resolution. Sign-out also bumps the epoch, which cancels the effect
//! of any in-flight role fetch for the session that just ended.
//!
//! Everything runs on the single UI thread; interior mutability is
//! `RefCell`/`Cell`, and no borrow is held across an await.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use crate::net::client::{SessionClient, SessionSubscription};
use crate::net::types::{AuthError, Identity, ProfileDefaults, Role, Session};
use crate::state::auth::AuthState;

/// A spawned-as-is local future; the store never requires `Send`.
pub type LocalFuture = Pin<Box<dyn Future<Output = ()>>>;

/// How the store schedules push-triggered resolutions. The browser build
/// passes `leptos::task::spawn_local`; tests pass a queue they drain.
pub type Spawner = Rc<dyn Fn(LocalFuture)>;

/// Identifies a registered state listener for `unsubscribe`.
pub type ListenerId = u64;

pub struct SessionStore<C> {
    client: C,
    spawn: Spawner,
    state: RefCell<AuthState>,
    epoch: Cell<u64>,
    alive: Cell<bool>,
    listeners: RefCell<Vec<(ListenerId, Rc<dyn Fn(&AuthState)>)>>,
    next_listener: Cell<ListenerId>,
    subscription: RefCell<Option<SessionSubscription>>,
}

impl<C: SessionClient + 'static> SessionStore<C> {
    pub fn new(client: C, spawn: Spawner) -> Rc<Self> {
        Rc::new(Self {
            client,
            spawn,
            state: RefCell::new(AuthState::default()),
            epoch: Cell::new(0),
            alive: Cell::new(true),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
            subscription: RefCell::new(None),
        })
    }

    /// Fetch the current session and its role, then clear the loading
    /// flag. Also hooks the backend's push channel so later sign-in,
    /// sign-out, and token-refresh events converge the state.
    ///
    /// The subscription is taken out before the session fetch so an event
    /// arriving mid-fetch supersedes the fetch instead of being missed.
    pub async fn initialize(self: Rc<Self>) {
        let weak = Rc::downgrade(&self);
        let spawn = self.spawn.clone();
        let subscription = self
            .client
            .subscribe_session_changes(Rc::new(move |session| {
                let Some(store) = weak.upgrade() else {
                    return;
                };
                (spawn)(Box::pin(async move {
                    store.handle_session_change(session).await;
                }));
            }));
        *self.subscription.borrow_mut() = Some(subscription);

        let epoch = self.next_epoch();
        let session = self.client.current_session().await;
        self.resolve(epoch, session).await;
    }

    /// Converge on a push-delivered session change. No-op once the store
    /// has been torn down.
    pub async fn handle_session_change(&self, session: Option<Session>) {
        let epoch = self.next_epoch();
        self.resolve(epoch, session).await;
    }

    /// One resolution cycle: land the session, fetch its role, land the
    /// role, clear loading. Bails out at every step if superseded.
    async fn resolve(&self, epoch: u64, session: Option<Session>) {
        if !self.is_current(epoch) {
            return;
        }
        let authenticated = session.is_some();
        self.mutate(|state| state.apply_session(session));

        // A failed role fetch degrades to None; it must never leave the
        // store stuck in the checking state.
        let role = if authenticated {
            self.client.fetch_role_for_current_identity().await
        } else {
            None
        };

        if !self.is_current(epoch) {
            return;
        }
        self.mutate(|state| {
            state.apply_role(role);
            state.finish_loading();
        });
    }

    /// Exchange credentials for a session. State is not mutated here; the
    /// backend's push channel delivers the resulting session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.client.sign_in_with_password(email, password).await
    }

    /// Create an account and its initial profile row (role `user`).
    ///
    /// If the profile write fails after the account was created, the whole
    /// operation is reported as failed even though an account now exists
    /// without a profile row; the store does not repair that on its own.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Identity, AuthError> {
        let identity = self.client.sign_up(email, password, full_name).await?;
        let defaults = ProfileDefaults {
            id: identity.id.clone(),
            full_name: full_name.to_owned(),
            role: Role::User.as_str().to_owned(),
        };
        match self.client.upsert_profile(&defaults).await {
            Ok(()) => Ok(identity),
            Err(_) => Err(AuthError::ProfileWrite),
        }
    }

    /// End the session and clear the state immediately, without waiting
    /// for the push notification, so no authenticated UI flashes while
    /// the round trip completes. Succeeds when already signed out.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.client.sign_out().await?;
        // Supersede any in-flight resolution for the session that ended.
        self.next_epoch();
        self.mutate(|state| {
            state.clear();
            state.finish_loading();
        });
        Ok(())
    }

    /// Dispatch a password-reset email.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.client.send_password_reset(email).await
    }

    /// Register a listener notified after every state change.
    pub fn subscribe(&self, listener: impl Fn(&AuthState) + 'static) -> ListenerId {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }

    /// Current state, cloned.
    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Detach from the push channel and refuse all later mutations.
    pub fn teardown(&self) {
        self.alive.set(false);
        self.next_epoch();
        if let Some(subscription) = self.subscription.borrow_mut().take() {
            subscription.unsubscribe();
        }
    }

    fn next_epoch(&self) -> u64 {
        let epoch = self.epoch.get() + 1;
        self.epoch.set(epoch);
        epoch
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.alive.get() && self.epoch.get() == epoch
    }

    fn mutate(&self, f: impl FnOnce(&mut AuthState)) {
        f(&mut self.state.borrow_mut());
        // Listeners run outside the state borrow so they may re-enter the
        // store (snapshot, unsubscribe) safely.
        let listeners: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        let state = self.snapshot();
        for listener in listeners {
            listener(&state);
        }
    }
}
