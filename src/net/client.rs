//! Capability interface the session store consumes from the backend.
//!
//! The store never talks to the network directly; it goes through this
//! trait so the auth state machine can be exercised natively with a
//! scripted client while the browser build plugs in [`SupabaseClient`].
//!
//! Everything runs on the single UI thread, so no `Send` bounds appear
//! anywhere and handlers are plain `Rc` closures.
//!
//! [`SupabaseClient`]: crate::net::supabase::SupabaseClient

use std::rc::Rc;

use crate::net::types::{AuthError, Identity, ProfileDefaults, Role, Session};

/// Callback invoked by the backend's push channel on sign-in, sign-out,
/// or token refresh. `None` means the session ended.
pub type SessionChangeHandler = Rc<dyn Fn(Option<Session>)>;

/// Handle for an active push-channel subscription.
///
/// Unsubscribes when dropped; `unsubscribe` exists for call sites that
/// want the teardown to read explicitly.
pub struct SessionSubscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl SessionSubscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Backend operations the session store depends on.
#[allow(async_fn_in_trait)]
pub trait SessionClient {
    /// One-shot fetch of the current session, refreshing it if the backend
    /// supports that. `None` when unauthenticated.
    async fn current_session(&self) -> Option<Session>;

    /// Register a handler for push-delivered session changes. At most one
    /// handler per subscription.
    fn subscribe_session_changes(&self, handler: SessionChangeHandler) -> SessionSubscription;

    /// Exchange credentials for a session. Success is reported through the
    /// push channel, not the return value.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Create an account. Returns the new identity; any session that
    /// results arrives through the push channel.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Identity, AuthError>;

    /// End the current session. Must succeed when no session is active.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Dispatch a password-reset email.
    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;

    /// Read the role column of the current identity's profile row.
    /// `None` covers both "no row" and "fetch failed".
    async fn fetch_role_for_current_identity(&self) -> Option<Role>;

    /// Write the initial profile row for a newly created account.
    async fn upsert_profile(&self, defaults: &ProfileDefaults) -> Result<(), AuthError>;
}
