use super::*;

// =============================================================
// NoticeState
// =============================================================

#[test]
fn notice_state_default_is_empty() {
    let state = NoticeState::default();
    assert!(state.items.is_empty());
}

#[test]
fn push_assigns_increasing_ids() {
    let mut state = NoticeState::default();
    let a = state.push_error("first");
    let b = state.push_info("second");
    assert!(b > a);
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.items[0].kind, NoticeKind::Error);
    assert_eq!(state.items[1].kind, NoticeKind::Info);
}

#[test]
fn dismiss_removes_only_the_target() {
    let mut state = NoticeState::default();
    let a = state.push_error("first");
    let b = state.push_info("second");
    state.dismiss(a);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, b);

    // Dismissing an unknown id is harmless.
    state.dismiss(999);
    assert_eq!(state.items.len(), 1);
}
