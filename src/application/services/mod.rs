//! Business logic services for the application layer.

pub mod auth_service;
pub mod url_service;

pub use auth_service::{AuthService, Authenticated};
pub use url_service::{ShortenInput, UrlService};
