use super::*;

// =============================================================
// Role conversions
// =============================================================

#[test]
fn role_round_trips_known_values() {
    assert_eq!(Role::from("user"), Role::User);
    assert_eq!(Role::from("admin"), Role::Admin);
    assert_eq!(Role::User.as_str(), "user");
    assert_eq!(Role::Admin.as_str(), "admin");
}

#[test]
fn role_preserves_unknown_values() {
    let role = Role::from("editor");
    assert_eq!(role, Role::Other("editor".to_owned()));
    assert_eq!(role.as_str(), "editor");
}

// =============================================================
// Session / row deserialization
// =============================================================

#[test]
fn session_deserializes_with_partial_identity() {
    let json = serde_json::json!({
        "access_token": "at",
        "refresh_token": "rt",
        "expires_at": 1_700_000_000,
        "user": { "id": "u-1" }
    });
    let session: Session = serde_json::from_value(json).expect("session");
    assert_eq!(session.user.id, "u-1");
    assert!(session.user.email.is_none());
    assert!(session.user.full_name.is_none());
}

#[test]
fn post_tolerates_missing_optional_columns() {
    let json = serde_json::json!({
        "id": "p-1",
        "title": "Hello",
        "slug": "hello"
    });
    let post: Post = serde_json::from_value(json).expect("post");
    assert!(post.excerpt.is_none());
    assert!(post.category_id.is_none());
}

#[test]
fn post_draft_skips_unset_foreign_keys() {
    let draft = PostDraft {
        title: "T".to_owned(),
        slug: "t".to_owned(),
        status: "published".to_owned(),
        ..PostDraft::default()
    };
    let value = serde_json::to_value(&draft).expect("draft json");
    assert!(value.get("category_id").is_none());
    assert!(value.get("author_id").is_none());
}

// =============================================================
// AuthError display
// =============================================================

#[test]
fn auth_error_messages_are_user_presentable() {
    assert_eq!(
        AuthError::CredentialsRejected.to_string(),
        "invalid email or password"
    );
    assert_eq!(
        AuthError::Unknown("boom".to_owned()).to_string(),
        "boom"
    );
}
