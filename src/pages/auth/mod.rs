//! Sign-in, registration, and password-reset pages.

pub mod forgot_password;
pub mod login;
pub mod register;
