use super::*;
use crate::net::types::{Identity, Session};

fn checking() -> AuthState {
    AuthState::default()
}

fn signed_out() -> AuthState {
    let mut state = AuthState::default();
    state.finish_loading();
    state
}

fn signed_in(role: Option<Role>) -> AuthState {
    let mut state = AuthState::default();
    state.apply_session(Some(Session {
        access_token: "at".to_owned(),
        refresh_token: "rt".to_owned(),
        expires_at: 1_700_000_000,
        user: Identity {
            id: "u-1".to_owned(),
            email: None,
            full_name: None,
        },
    }));
    state.apply_role(role);
    state.finish_loading();
    state
}

// =============================================================
// Authenticated guard
// =============================================================

#[test]
fn authenticated_guard_waits_while_loading() {
    assert_eq!(authenticated_decision(&checking()), GuardDecision::Checking);
}

#[test]
fn authenticated_guard_redirects_signed_out_visitors() {
    assert_eq!(
        authenticated_decision(&signed_out()),
        GuardDecision::RedirectLogin
    );
}

#[test]
fn authenticated_guard_allows_signed_in_users() {
    assert_eq!(
        authenticated_decision(&signed_in(Some(Role::User))),
        GuardDecision::Allow
    );
}

#[test]
fn authenticated_guard_ignores_role() {
    // Role may still be unresolved; identity alone is enough here.
    assert_eq!(
        authenticated_decision(&signed_in(None)),
        GuardDecision::Allow
    );
}

// =============================================================
// Role guard
// =============================================================

#[test]
fn role_guard_waits_while_loading() {
    assert_eq!(
        role_decision(&checking(), &[Role::Admin]),
        GuardDecision::Checking
    );
}

#[test]
fn role_guard_sends_signed_out_visitors_to_login() {
    assert_eq!(
        role_decision(&signed_out(), &[Role::Admin]),
        GuardDecision::RedirectLogin
    );
}

#[test]
fn role_guard_sends_wrong_role_home() {
    assert_eq!(
        role_decision(&signed_in(Some(Role::User)), &[Role::Admin]),
        GuardDecision::RedirectHome
    );
}

#[test]
fn role_guard_allows_member_roles() {
    assert_eq!(
        role_decision(&signed_in(Some(Role::Admin)), &[Role::Admin]),
        GuardDecision::Allow
    );
    assert_eq!(
        role_decision(&signed_in(Some(Role::User)), &[Role::Admin, Role::User]),
        GuardDecision::Allow
    );
}

#[test]
fn role_guard_treats_unresolved_role_as_not_permitted() {
    assert_eq!(
        role_decision(&signed_in(None), &[Role::Admin]),
        GuardDecision::RedirectHome
    );
}
