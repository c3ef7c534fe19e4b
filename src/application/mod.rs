//! Application layer services implementing business logic.
//!
//! Services sequence validation and calls into the hosted backend, and are
//! what HTTP handlers talk to.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Shortening, listing, deleting, resolving, analytics
//! - [`services::auth_service::AuthService`] - Session checks, sign-in, sign-up, sign-out

pub mod services;
