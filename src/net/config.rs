//! Backend endpoint configuration, resolved at compile time.
//!
//! The hosted backend's URL and publishable anon key are baked into the
//! WASM bundle the same way a bundler would inline build-time env vars.
//! Dev fallbacks point at a local stack.

pub fn base_url() -> String {
    option_env!("INKPRESS_SUPABASE_URL")
        .unwrap_or("http://localhost:54321")
        .trim_end_matches('/')
        .to_owned()
}

pub fn anon_key() -> &'static str {
    option_env!("INKPRESS_SUPABASE_ANON_KEY").unwrap_or("dev-anon-key")
}
