//! Small helpers with no better home.

pub mod dark_mode;
pub mod slug;
