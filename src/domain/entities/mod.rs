//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`ShortUrl`] - A user's shortened URL row
//! - [`AuthUser`] / [`Session`] - Identity returned by the auth service
//! - [`UrlAnalytics`] - Aggregated click figures for the dashboard
//!
//! Creation inputs use separate structs (`NewShortUrl`), following the
//! "new type for inserts" pattern used throughout the crate.

pub mod analytics;
pub mod short_url;
pub mod user;

pub use analytics::UrlAnalytics;
pub use short_url::{NewShortUrl, ShortUrl};
pub use user::{AuthUser, Session};
