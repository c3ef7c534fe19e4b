//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Contracts for the remote data and auth services
//! - [`click_event`] - Click counting event model
//! - [`click_worker`] - Asynchronous click processing worker
//! - [`url_event`] - Change notifications for a user's URLs
//!
//! # Click Processing Flow
//!
//! 1. Redirect handler resolves a short code
//! 2. [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] calls the remote increment function
//! 4. The redirect response never waits for step 3

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
pub mod url_event;
