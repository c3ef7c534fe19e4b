//! Page middleware.

pub mod web_auth;
