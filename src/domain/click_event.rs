//! Click event model for asynchronous click counting.

/// A redirect that should be counted against a short code.
///
/// Sent from the redirect handler to the background worker through a bounded
/// channel so the HTTP response never waits on the increment call.
///
/// # Usage Flow
///
/// 1. Created in [`crate::api::handlers::redirect_handler`] after a successful lookup
/// 2. Sent to the click channel with `try_send` (dropped when the queue is full)
/// 3. Processed by [`crate::domain::click_worker::run_click_worker`], which calls
///    the `increment_url_clicks` database function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub short_code: String,
}

impl ClickEvent {
    pub fn new(short_code: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
        }
    }
}
