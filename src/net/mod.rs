//! Backend access: the session capability interface, its hosted-backend
//! implementation, the content REST helpers, and the shared wire types.

pub mod client;
pub mod config;
pub mod rest;
pub mod supabase;
pub mod types;
