//! Hosted-backend session client over the Supabase REST surface.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` against
//! `/auth/v1` and `/rest/v1`, with the session persisted in
//! `localStorage` and refreshed through the refresh token when expired.
//! Server-side (SSR): stubs returning `None`/`Err` since authentication
//! only happens in the browser.
//!
//! The push channel the session store subscribes to is local: this
//! client notifies its listeners after every call that changes the
//! session (sign-in, sign-out, token refresh). Response parsing lives in
//! plain functions at the bottom so it stays testable off-browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "supabase_test.rs"]
mod supabase_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::net::client::{SessionChangeHandler, SessionClient, SessionSubscription};
use crate::net::config;
use crate::net::types::{AuthError, Identity, ProfileDefaults, Role, Session};

#[cfg(feature = "hydrate")]
const SESSION_KEY: &str = "inkpress_session";

/// Seconds of clock skew tolerated before a token counts as expired.
const EXPIRY_MARGIN_SECS: i64 = 30;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, SessionChangeHandler)>,
}

/// The real backend client. Cheap to clone; clones share the listener
/// registry.
#[derive(Clone, Default)]
pub struct SupabaseClient {
    listeners: Rc<RefCell<Listeners>>,
}

impl SupabaseClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn notify(&self, session: Option<Session>) {
        let handlers: Vec<SessionChangeHandler> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        for handler in handlers {
            handler(session.clone());
        }
    }

    #[cfg(feature = "hydrate")]
    async fn refresh(&self, refresh_token: &str) -> Option<Session> {
        let url = format!("{}/auth/v1/token?grant_type=refresh_token", config::base_url());
        let body = serde_json::json!({ "refresh_token": refresh_token });
        let resp = gloo_net::http::Request::post(&url)
            .header("apikey", config::anon_key())
            .json(&body)
            .ok()?
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        let value = resp.json::<serde_json::Value>().await.ok()?;
        session_from_token_response(&value, now_secs())
    }
}

impl SessionClient for SupabaseClient {
    async fn current_session(&self) -> Option<Session> {
        #[cfg(feature = "hydrate")]
        {
            let session = stored_session()?;
            if !session_is_expired(&session, now_secs()) {
                return Some(session);
            }
            match self.refresh(&session.refresh_token).await {
                Some(fresh) => {
                    store_session(Some(&fresh));
                    self.notify(Some(fresh.clone()));
                    Some(fresh)
                }
                None => {
                    store_session(None);
                    self.notify(None);
                    None
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn subscribe_session_changes(&self, handler: SessionChangeHandler) -> SessionSubscription {
        let id = {
            let mut listeners = self.listeners.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, handler));
            id
        };
        let registry = self.listeners.clone();
        SessionSubscription::new(move || {
            registry.borrow_mut().entries.retain(|(lid, _)| *lid != id);
        })
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let url = format!("{}/auth/v1/token?grant_type=password", config::base_url());
            let body = serde_json::json!({ "email": email, "password": password });
            let resp = gloo_net::http::Request::post(&url)
                .header("apikey", config::anon_key())
                .json(&body)
                .map_err(|_| AuthError::Network)?
                .send()
                .await
                .map_err(|_| AuthError::Network)?;

            match resp.status() {
                200 => {
                    let value = resp
                        .json::<serde_json::Value>()
                        .await
                        .map_err(|_| AuthError::Network)?;
                    let session = session_from_token_response(&value, now_secs())
                        .ok_or_else(|| AuthError::Unknown("malformed session".to_owned()))?;
                    store_session(Some(&session));
                    self.notify(Some(session));
                    Ok(())
                }
                400 | 401 => Err(AuthError::CredentialsRejected),
                status => Err(AuthError::Unknown(format!("sign-in failed ({status})"))),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(AuthError::Network)
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Identity, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let url = format!("{}/auth/v1/signup", config::base_url());
            let body = serde_json::json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name }
            });
            let resp = gloo_net::http::Request::post(&url)
                .header("apikey", config::anon_key())
                .json(&body)
                .map_err(|_| AuthError::Network)?
                .send()
                .await
                .map_err(|_| AuthError::Network)?;

            if !resp.ok() {
                let message = resp
                    .json::<serde_json::Value>()
                    .await
                    .ok()
                    .and_then(|v| error_message(&v))
                    .unwrap_or_else(|| format!("sign-up failed ({})", resp.status()));
                return Err(AuthError::Unknown(message));
            }

            let value = resp
                .json::<serde_json::Value>()
                .await
                .map_err(|_| AuthError::Network)?;

            // With email auto-confirm the signup response is a full
            // session; persist it and let the push channel converge.
            if let Some(session) = session_from_token_response(&value, now_secs()) {
                let identity = session.user.clone();
                store_session(Some(&session));
                self.notify(Some(session));
                return Ok(identity);
            }

            identity_from_user_value(&value)
                .ok_or_else(|| AuthError::Unknown("malformed sign-up response".to_owned()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password, full_name);
            Err(AuthError::Network)
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            // Already signed out: nothing to do, and not an error.
            let Some(session) = stored_session() else {
                return Ok(());
            };
            let url = format!("{}/auth/v1/logout", config::base_url());
            let result = gloo_net::http::Request::post(&url)
                .header("apikey", config::anon_key())
                .header("Authorization", &format!("Bearer {}", session.access_token))
                .send()
                .await;
            if result.is_err() {
                return Err(AuthError::Network);
            }
            // Revocation answered (even 401 for an already-dead token):
            // drop the local copy and tell listeners.
            store_session(None);
            self.notify(None);
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Ok(())
        }
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let url = format!("{}/auth/v1/recover", config::base_url());
            let body = serde_json::json!({ "email": email });
            let resp = gloo_net::http::Request::post(&url)
                .header("apikey", config::anon_key())
                .json(&body)
                .map_err(|_| AuthError::Network)?
                .send()
                .await
                .map_err(|_| AuthError::Network)?;
            if resp.ok() {
                Ok(())
            } else {
                Err(AuthError::Unknown(format!("reset failed ({})", resp.status())))
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = email;
            Err(AuthError::Network)
        }
    }

    async fn fetch_role_for_current_identity(&self) -> Option<Role> {
        #[cfg(feature = "hydrate")]
        {
            let session = stored_session()?;
            let url = format!(
                "{}/rest/v1/profiles?id=eq.{}&select=role",
                config::base_url(),
                session.user.id
            );
            let resp = gloo_net::http::Request::get(&url)
                .header("apikey", config::anon_key())
                .header("Authorization", &format!("Bearer {}", session.access_token))
                .send()
                .await
                .ok()?;
            if !resp.ok() {
                leptos::logging::warn!("role fetch failed: {}", resp.status());
                return None;
            }
            let rows = resp.json::<serde_json::Value>().await.ok()?;
            role_from_rows(&rows)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    async fn upsert_profile(&self, defaults: &ProfileDefaults) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let url = format!("{}/rest/v1/profiles", config::base_url());
            let token = stored_session()
                .map(|s| s.access_token)
                .unwrap_or_else(|| config::anon_key().to_owned());
            let body = serde_json::json!({
                "id": defaults.id,
                "full_name": defaults.full_name,
                "role": defaults.role,
                "created_at": now_iso(),
            });
            let resp = gloo_net::http::Request::post(&url)
                .header("apikey", config::anon_key())
                .header("Authorization", &format!("Bearer {token}"))
                .header("Prefer", "resolution=merge-duplicates")
                .json(&body)
                .map_err(|_| AuthError::Network)?
                .send()
                .await
                .map_err(|_| AuthError::Network)?;
            if resp.ok() {
                Ok(())
            } else {
                Err(AuthError::ProfileWrite)
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = defaults;
            Err(AuthError::Network)
        }
    }
}

// =============================================================================
// LOCAL PERSISTENCE
// =============================================================================

/// Read the persisted session, if any. Also used by the content REST
/// layer to attach the bearer token.
pub fn stored_session() -> Option<Session> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window()?.local_storage().ok()??;
        let raw = storage.get_item(SESSION_KEY).ok()??;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Bearer token for authenticated REST calls; falls back to the anon key.
pub fn bearer_token() -> String {
    stored_session()
        .map(|s| s.access_token)
        .unwrap_or_else(|| config::anon_key().to_owned())
}

#[cfg(feature = "hydrate")]
fn store_session(session: Option<&Session>) {
    let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
        return;
    };
    match session {
        Some(session) => {
            if let Ok(raw) = serde_json::to_string(session) {
                let _ = storage.set_item(SESSION_KEY, &raw);
            }
        }
        None => {
            let _ = storage.remove_item(SESSION_KEY);
        }
    }
}

#[cfg(feature = "hydrate")]
fn now_secs() -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    {
        (js_sys::Date::now() / 1000.0) as i64
    }
}

#[cfg(feature = "hydrate")]
fn now_iso() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

/// Build a [`Session`] from a `/auth/v1` token or signup response.
/// `expires_at` falls back to `now + expires_in` when absent.
fn session_from_token_response(value: &serde_json::Value, now: i64) -> Option<Session> {
    let access_token = value.get("access_token")?.as_str()?.to_owned();
    let refresh_token = value.get("refresh_token")?.as_str()?.to_owned();
    let expires_at = value
        .get("expires_at")
        .and_then(serde_json::Value::as_i64)
        .or_else(|| {
            value
                .get("expires_in")
                .and_then(serde_json::Value::as_i64)
                .map(|secs| now + secs)
        })
        .unwrap_or(now + 3600);
    let user = identity_from_user_value(value.get("user")?)?;
    Some(Session { access_token, refresh_token, expires_at, user })
}

/// Map a backend user object onto [`Identity`], pulling the display name
/// out of `user_metadata`.
fn identity_from_user_value(value: &serde_json::Value) -> Option<Identity> {
    let id = value.get("id")?.as_str()?.to_owned();
    let email = value
        .get("email")
        .and_then(|v| v.as_str())
        .map(ToOwned::to_owned);
    let full_name = value
        .get("user_metadata")
        .and_then(|m| m.get("full_name"))
        .and_then(|v| v.as_str())
        .map(ToOwned::to_owned);
    Some(Identity { id, email, full_name })
}

fn session_is_expired(session: &Session, now: i64) -> bool {
    session.expires_at <= now + EXPIRY_MARGIN_SECS
}

/// Pull the role out of a `profiles` row set. A row without a role column
/// counts as a plain user; no rows means the profile is missing.
fn role_from_rows(rows: &serde_json::Value) -> Option<Role> {
    let first = rows.as_array()?.first()?;
    match first.get("role").and_then(|v| v.as_str()) {
        Some(role) => Some(Role::from(role)),
        None => Some(Role::User),
    }
}

/// Best-effort extraction of a human-readable backend error message.
fn error_message(value: &serde_json::Value) -> Option<String> {
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(ToOwned::to_owned)
}
