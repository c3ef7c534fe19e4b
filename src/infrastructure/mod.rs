//! Infrastructure layer for the hosted backend.
//!
//! Implements the contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL implementation of the URL repository
//! - [`auth`] - GoTrue REST client implementing the auth provider
//! - [`notifications`] - Change event fan-out and the `LISTEN/NOTIFY` relay

pub mod auth;
pub mod notifications;
pub mod persistence;
