//! Change notifications for users' URL lists.
//!
//! - [`UrlEventBus`] - in-process fan-out of [`crate::domain::url_event::UrlEvent`]s
//! - [`run_change_listener`] - relays PostgreSQL `NOTIFY urls_changes` into the bus

mod event_bus;
mod pg_listener;

pub use event_bus::UrlEventBus;
pub use pg_listener::{CHANGES_CHANNEL, run_change_listener};
