//! Contracts for the hosted backend.
//!
//! The application owns no storage or identity logic of its own: every read,
//! write and credential check is a call into the hosted database or auth API.
//! These traits describe exactly the calls the application makes, so that
//! handlers and services can be exercised against in-memory doubles.
//!
//! # Available Contracts
//!
//! - [`UrlRepository`] - `urls` table access and the two database RPCs
//! - [`AuthProvider`] - session-based auth API
//!
//! Mock implementations are generated with `mockall` for unit tests.

pub mod auth_provider;
pub mod url_repository;

pub use auth_provider::AuthProvider;
pub use url_repository::UrlRepository;

#[cfg(test)]
pub use auth_provider::MockAuthProvider;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
