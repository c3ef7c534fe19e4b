//! Clients for the hosted auth service.
//!
//! - [`GoTrueClient`] - GoTrue REST API (the auth service behind Supabase projects)

pub mod gotrue_client;

pub use gotrue_client::GoTrueClient;
