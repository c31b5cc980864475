//! Authentication state shared across the application.
//!
//! DESIGN
//! ======
//! `AuthState` is the read model every view sees: identity, session,
//! resolved role, and a loading flag that stays true until the first
//! session resolution finishes. The struct is plain data; the session
//! store owns the single mutable copy and publishes clones through an
//! `RwSignal` provided via context.
//!
//! The transition methods keep two invariants:
//! - `role` is `None` whenever there is no identity, and between a
//!   session change and the completion of its role fetch;
//! - a resolution for a superseded session never lands (the store tags
//!   each resolution with an epoch and drops stale completions before
//!   calling into these methods).

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{Identity, Role, Session};

/// Current identity, session, role, and loading flag.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub identity: Option<Identity>,
    pub session: Option<Session>,
    pub role: Option<Role>,
    pub loading: bool,
}

impl Default for AuthState {
    /// Starts in the checking state: nothing resolved, loading set.
    fn default() -> Self {
        Self {
            identity: None,
            session: None,
            role: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn has_role(&self, allowed: &[Role]) -> bool {
        self.role.as_ref().is_some_and(|r| allowed.contains(r))
    }

    /// Replace session and identity for a new resolution. The role is
    /// dropped until the accompanying role fetch completes.
    pub fn apply_session(&mut self, session: Option<Session>) {
        self.identity = session.as_ref().map(|s| s.user.clone());
        self.session = session;
        self.role = None;
    }

    /// Land the role fetched for the current session.
    pub fn apply_role(&mut self, role: Option<Role>) {
        self.role = role;
    }

    /// Mark the resolution cycle finished.
    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    /// Drop identity, session, and role, as on sign-out.
    pub fn clear(&mut self) {
        self.identity = None;
        self.session = None;
        self.role = None;
    }
}
