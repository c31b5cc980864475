//! Reusable UI components.

pub mod guard;
pub mod layout;
pub mod nav_bar;
pub mod notices;
pub mod post_card;
pub mod spinner;
