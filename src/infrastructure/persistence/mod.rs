//! PostgreSQL repository implementations.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - `urls` table access and the `generate_short_code` /
//!   `increment_url_clicks` database functions

pub mod pg_url_repository;

pub use pg_url_repository::PgUrlRepository;
