use super::*;

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

// =============================================================
// Defaults
// =============================================================

#[test]
fn auth_state_default_is_checking() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(state.identity.is_none());
    assert!(state.session.is_none());
    assert!(state.role.is_none());
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn apply_session_sets_identity_and_drops_role() {
    let mut state = AuthState::default();
    state.apply_session(Some(session("u-1")));
    state.apply_role(Some(Role::Admin));
    assert!(state.has_role(&[Role::Admin]));

    // A new session supersedes the resolved role until its own fetch lands.
    state.apply_session(Some(session("u-2")));
    assert_eq!(state.identity.as_ref().map(|i| i.id.as_str()), Some("u-2"));
    assert!(state.role.is_none());
}

#[test]
fn apply_session_none_clears_identity() {
    let mut state = AuthState::default();
    state.apply_session(Some(session("u-1")));
    state.apply_session(None);
    assert!(state.identity.is_none());
    assert!(state.session.is_none());
    assert!(state.role.is_none());
}

#[test]
fn clear_keeps_loading_untouched() {
    let mut state = AuthState::default();
    state.apply_session(Some(session("u-1")));
    state.finish_loading();
    state.clear();
    assert!(!state.loading);
    assert!(!state.is_authenticated());
}

// =============================================================
// Role membership
// =============================================================

#[test]
fn has_role_requires_membership() {
    let mut state = AuthState::default();
    state.apply_session(Some(session("u-1")));
    state.apply_role(Some(Role::User));
    assert!(!state.has_role(&[Role::Admin]));
    assert!(state.has_role(&[Role::Admin, Role::User]));
}

#[test]
fn has_role_is_false_while_role_unresolved() {
    let mut state = AuthState::default();
    state.apply_session(Some(session("u-1")));
    assert!(!state.has_role(&[Role::User, Role::Admin]));
}
