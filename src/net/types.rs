//! Domain and wire types shared between the backend client and the UI.
//!
//! Row structs mirror the backend tables (`posts`, `categories`,
//! `comments`, `broadcasts`, `profiles`) with ids and timestamps kept as
//! strings, matching the JSON the REST layer returns.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A live authenticated credential state issued by the backend.
///
/// Owned exclusively by the session store; persisted only by the backend
/// client itself (localStorage), never by application code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp (seconds) at which the access token expires.
    pub expires_at: i64,
    pub user: Identity,
}

/// The authenticated subject's minimal public attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Authorization classifier gating admin-only views.
///
/// The backend stores this as a plain string; anything other than the two
/// known values round-trips through `Other`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Other(s) => s,
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "user" => Role::User,
            "admin" => Role::Admin,
            other => Role::Other(other.to_owned()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed failure reasons for authentication operations.
///
/// Surfaced to callers as values; the caller decides how to present them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    CredentialsRejected,
    #[error("could not reach the server")]
    Network,
    #[error("account created, but saving the profile failed")]
    ProfileWrite,
    #[error("{0}")]
    Unknown(String),
}

/// Initial `profiles` row written right after account creation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfileDefaults {
    pub id: String,
    pub full_name: String,
    pub role: String,
}

/// Editable profile fields the profile page submits. Deliberately
/// excludes `role`: users never change their own classifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub avatar_url: String,
    pub website: String,
    pub bio: String,
}

/// A `profiles` row as read back for the profile page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A blog post row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Fields the post editor submits for insert/update.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    pub status: String,
}

/// A category row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// A comment row, including its moderation status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentRow {
    pub id: String,
    pub post_id: String,
    #[serde(default)]
    pub author_name: Option<String>,
    pub content: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Fields a broadcast composer submits.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BroadcastDraft {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<String>,
}
