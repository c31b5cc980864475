//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` holds the read model every view consumes; `session` owns the
//! store that mutates it; `notices` carries transient banners. Views get
//! the read models as `RwSignal` contexts and never mutate auth state
//! directly.

pub mod auth;
pub mod notices;
pub mod session;
