//! Route-level page components.

pub mod admin;
pub mod auth;
pub mod category;
pub mod home;
pub mod not_found;
pub mod post_detail;
pub mod profile;
pub mod search;
