//! Route guards gating authenticated and role-restricted views.
//!
//! DESIGN
//! ======
//! The decision logic is a pure function of the current auth state so it
//! can be tested as a table; the components only map decisions onto
//! rendering and navigation. While the session store is still resolving
//! (`loading`), guards render a neutral placeholder and never redirect —
//! redirecting early would bounce signed-in users to the login page on
//! every reload. Guards never trigger fetches.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::spinner::Spinner;
use crate::net::types::Role;
use crate::state::auth::AuthState;

/// Outcome of consulting the auth state at render time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Still resolving; render a placeholder, do not redirect.
    Checking,
    /// Render the wrapped content.
    Allow,
    /// Send the visitor to the sign-in page. The attempted location is
    /// discarded; there is no return-to-origin.
    RedirectLogin,
    /// Authenticated but not permitted; send home.
    RedirectHome,
}

/// Decision table for routes that only require a signed-in user.
pub fn authenticated_decision(state: &AuthState) -> GuardDecision {
    if state.loading {
        GuardDecision::Checking
    } else if state.is_authenticated() {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectLogin
    }
}

/// Decision table for routes restricted to a set of roles. Supersedes
/// the authenticated check: missing identity still goes to sign-in,
/// wrong (or unresolved) role goes home.
pub fn role_decision(state: &AuthState, allowed: &[Role]) -> GuardDecision {
    if state.loading {
        GuardDecision::Checking
    } else if !state.is_authenticated() {
        GuardDecision::RedirectLogin
    } else if state.has_role(allowed) {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectHome
    }
}

/// Wraps content that requires a signed-in user.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let decision = Memo::new(move |_| authenticated_decision(&auth.get()));
    guarded(decision, children)
}

/// Wraps content restricted to the given roles.
#[component]
pub fn RequireRole(allowed: Vec<Role>, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let decision = Memo::new(move |_| role_decision(&auth.get(), &allowed));
    guarded(decision, children)
}

fn guarded(decision: Memo<GuardDecision>, children: ChildrenFn) -> impl IntoView {
    let navigate = use_navigate();

    Effect::new(move || match decision.get() {
        GuardDecision::RedirectLogin => navigate("/auth/login", NavigateOptions::default()),
        GuardDecision::RedirectHome => navigate("/", NavigateOptions::default()),
        GuardDecision::Checking | GuardDecision::Allow => {}
    });

    move || match decision.get() {
        GuardDecision::Checking => view! {
            <div class="guard-checking">
                <Spinner/>
            </div>
        }
        .into_any(),
        GuardDecision::Allow => children().into_any(),
        // Render nothing for the frame in which the redirect effect runs.
        GuardDecision::RedirectLogin | GuardDecision::RedirectHome => ().into_any(),
    }
}
