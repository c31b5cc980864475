//! Content REST helpers over the backend's `/rest/v1` row API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, authenticated
//! with the stored session's bearer token (anon key when signed out).
//! Server-side (SSR): stubs returning `None`/`Err` since content only
//! loads in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Reads degrade to `None` so a failed fetch renders as an empty page
//! rather than crashing hydration; writes return `Result` so forms can
//! surface the failure as a notice.

#![allow(clippy::unused_async)]

use crate::net::types::{
    BroadcastDraft, Category, CommentRow, Post, PostDraft, Profile, ProfileUpdate,
};

#[cfg(feature = "hydrate")]
fn rest_url(path_and_query: &str) -> String {
    format!("{}/rest/v1/{path_and_query}", crate::net::config::base_url())
}

/// GET a row set and deserialize it. `None` on any failure.
#[cfg(feature = "hydrate")]
async fn get_rows<T: serde::de::DeserializeOwned>(path_and_query: &str) -> Option<Vec<T>> {
    let resp = gloo_net::http::Request::get(&rest_url(path_and_query))
        .header("apikey", crate::net::config::anon_key())
        .header(
            "Authorization",
            &format!("Bearer {}", crate::net::supabase::bearer_token()),
        )
        .send()
        .await
        .ok()?;
    if !resp.ok() {
        leptos::logging::warn!("rest read failed: {} {}", resp.status(), path_and_query);
        return None;
    }
    resp.json::<Vec<T>>().await.ok()
}

/// POST/PATCH/DELETE a row set. `Err` carries a displayable message.
#[cfg(feature = "hydrate")]
async fn write_rows(
    method: &str,
    path_and_query: &str,
    body: Option<serde_json::Value>,
) -> Result<(), String> {
    let url = rest_url(path_and_query);
    let builder = match method {
        "POST" => gloo_net::http::Request::post(&url),
        "PATCH" => gloo_net::http::Request::patch(&url),
        "DELETE" => gloo_net::http::Request::delete(&url),
        other => return Err(format!("unsupported method {other}")),
    }
    .header("apikey", crate::net::config::anon_key())
    .header(
        "Authorization",
        &format!("Bearer {}", crate::net::supabase::bearer_token()),
    )
    .header("Prefer", "return=minimal");

    let request = match body {
        Some(body) => builder.json(&body).map_err(|e| e.to_string())?,
        None => builder.build().map_err(|e| e.to_string())?,
    };
    let resp = request.send().await.map_err(|e| e.to_string())?;
    if resp.ok() {
        Ok(())
    } else {
        Err(format!("request failed ({})", resp.status()))
    }
}

#[cfg(feature = "hydrate")]
fn encode(value: &str) -> String {
    js_sys::encode_uri_component(value).into()
}

// =============================================================================
// POSTS
// =============================================================================

/// Published posts, newest first.
pub async fn fetch_published_posts() -> Option<Vec<Post>> {
    #[cfg(feature = "hydrate")]
    {
        get_rows("posts?status=eq.published&order=created_at.desc&select=*").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Every post regardless of status, for the admin list.
pub async fn fetch_all_posts() -> Option<Vec<Post>> {
    #[cfg(feature = "hydrate")]
    {
        get_rows("posts?order=created_at.desc&select=*").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

pub async fn fetch_post_by_slug(slug: &str) -> Option<Post> {
    #[cfg(feature = "hydrate")]
    {
        let query = format!("posts?slug=eq.{}&limit=1&select=*", encode(slug));
        get_rows::<Post>(&query).await?.into_iter().next()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = slug;
        None
    }
}

pub async fn fetch_post_by_id(id: &str) -> Option<Post> {
    #[cfg(feature = "hydrate")]
    {
        let query = format!("posts?id=eq.{}&limit=1&select=*", encode(id));
        get_rows::<Post>(&query).await?.into_iter().next()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        None
    }
}

pub async fn fetch_posts_by_category(category_id: &str) -> Option<Vec<Post>> {
    #[cfg(feature = "hydrate")]
    {
        let query = format!(
            "posts?status=eq.published&category_id=eq.{}&order=created_at.desc&select=*",
            encode(category_id)
        );
        get_rows(&query).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = category_id;
        None
    }
}

pub async fn fetch_posts_by_author(author_id: &str) -> Option<Vec<Post>> {
    #[cfg(feature = "hydrate")]
    {
        let query = format!(
            "posts?author_id=eq.{}&order=created_at.desc&select=*",
            encode(author_id)
        );
        get_rows(&query).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = author_id;
        None
    }
}

/// Title/excerpt substring search over published posts.
pub async fn search_posts(term: &str) -> Option<Vec<Post>> {
    #[cfg(feature = "hydrate")]
    {
        let pattern = encode(&format!("*{term}*"));
        let query = format!(
            "posts?status=eq.published&or=(title.ilike.{pattern},excerpt.ilike.{pattern})&order=created_at.desc&select=*"
        );
        get_rows(&query).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = term;
        None
    }
}

/// # Errors
///
/// Returns a displayable message when the insert fails.
pub async fn create_post(draft: &PostDraft) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::to_value(draft).map_err(|e| e.to_string())?;
        write_rows("POST", "posts", Some(body)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = draft;
        Err("not available on server".to_owned())
    }
}

/// # Errors
///
/// Returns a displayable message when the update fails.
pub async fn update_post(id: &str, draft: &PostDraft) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::to_value(draft).map_err(|e| e.to_string())?;
        write_rows("PATCH", &format!("posts?id=eq.{}", encode(id)), Some(body)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, draft);
        Err("not available on server".to_owned())
    }
}

/// # Errors
///
/// Returns a displayable message when the delete fails.
pub async fn delete_post(id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        write_rows("DELETE", &format!("posts?id=eq.{}", encode(id)), None).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err("not available on server".to_owned())
    }
}

// =============================================================================
// CATEGORIES
// =============================================================================

pub async fn fetch_categories() -> Option<Vec<Category>> {
    #[cfg(feature = "hydrate")]
    {
        get_rows("categories?order=name.asc&select=*").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

pub async fn fetch_category_by_slug(slug: &str) -> Option<Category> {
    #[cfg(feature = "hydrate")]
    {
        let query = format!("categories?slug=eq.{}&limit=1&select=*", encode(slug));
        get_rows::<Category>(&query).await?.into_iter().next()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = slug;
        None
    }
}

/// # Errors
///
/// Returns a displayable message when the insert fails.
pub async fn create_category(name: &str, slug: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "name": name, "slug": slug });
        write_rows("POST", "categories", Some(body)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, slug);
        Err("not available on server".to_owned())
    }
}

/// # Errors
///
/// Returns a displayable message when the delete fails.
pub async fn delete_category(id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        write_rows("DELETE", &format!("categories?id=eq.{}", encode(id)), None).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err("not available on server".to_owned())
    }
}

// =============================================================================
// COMMENTS
// =============================================================================

/// Comments awaiting moderation (or any other status).
pub async fn fetch_comments_by_status(status: &str) -> Option<Vec<CommentRow>> {
    #[cfg(feature = "hydrate")]
    {
        let query = format!(
            "comments?status=eq.{}&order=created_at.desc&select=*",
            encode(status)
        );
        get_rows(&query).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = status;
        None
    }
}

/// Approved comments under a post, oldest first.
pub async fn fetch_approved_comments(post_id: &str) -> Option<Vec<CommentRow>> {
    #[cfg(feature = "hydrate")]
    {
        let query = format!(
            "comments?post_id=eq.{}&status=eq.approved&order=created_at.asc&select=*",
            encode(post_id)
        );
        get_rows(&query).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = post_id;
        None
    }
}

/// Submit a reader comment; it enters moderation as `pending`.
///
/// # Errors
///
/// Returns a displayable message when the insert fails.
pub async fn submit_comment(post_id: &str, author_name: &str, content: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({
            "post_id": post_id,
            "author_name": author_name,
            "content": content,
            "status": "pending",
        });
        write_rows("POST", "comments", Some(body)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (post_id, author_name, content);
        Err("not available on server".to_owned())
    }
}

/// # Errors
///
/// Returns a displayable message when the update fails.
pub async fn set_comment_status(id: &str, status: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "status": status });
        write_rows("PATCH", &format!("comments?id=eq.{}", encode(id)), Some(body)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, status);
        Err("not available on server".to_owned())
    }
}

/// # Errors
///
/// Returns a displayable message when the delete fails.
pub async fn delete_comment(id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        write_rows("DELETE", &format!("comments?id=eq.{}", encode(id)), None).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err("not available on server".to_owned())
    }
}

// =============================================================================
// BROADCASTS
// =============================================================================

/// # Errors
///
/// Returns a displayable message when the insert fails.
pub async fn create_broadcast(draft: &BroadcastDraft) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::to_value(draft).map_err(|e| e.to_string())?;
        write_rows("POST", "broadcasts", Some(body)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = draft;
        Err("not available on server".to_owned())
    }
}

// =============================================================================
// PROFILES
// =============================================================================

pub async fn fetch_profile(user_id: &str) -> Option<Profile> {
    #[cfg(feature = "hydrate")]
    {
        let query = format!("profiles?id=eq.{}&limit=1&select=*", encode(user_id));
        get_rows::<Profile>(&query).await?.into_iter().next()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = user_id;
        None
    }
}

/// # Errors
///
/// Returns a displayable message when the update fails.
pub async fn update_profile(user_id: &str, update: &ProfileUpdate) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::to_value(update).map_err(|e| e.to_string())?;
        write_rows(
            "PATCH",
            &format!("profiles?id=eq.{}", encode(user_id)),
            Some(body),
        )
        .await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (user_id, update);
        Err("not available on server".to_owned())
    }
}
