//! Admin-only management pages, all nested under the role-gated layout.

pub mod broadcast;
pub mod categories;
pub mod comments;
pub mod dashboard;
pub mod post_editor;
pub mod posts;
