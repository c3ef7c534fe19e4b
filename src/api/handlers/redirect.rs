//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::HeaderValue,
    response::Redirect,
};
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_code}`
///
/// # Request Flow
///
/// 1. Look up the original URL by short code
/// 2. Enqueue a click for the background worker
/// 3. Return `307 Temporary Redirect`
///
/// Unknown codes, lookup failures and stored URLs that cannot be sent as a
/// `Location` header redirect to `/` without counting a click.
///
/// # Click Tracking
///
/// Click events go to a bounded channel. If the queue is full the click is
/// dropped with a warning; the redirect never waits on the increment.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Redirect {
    let original_url = match state.url_service.resolve(&short_code).await {
        Ok(Some(url)) => url,
        Ok(None) => {
            debug!(%short_code, "Unknown short code");
            return Redirect::temporary("/");
        }
        Err(e) => {
            warn!(%short_code, "Short code lookup failed: {}", e);
            return Redirect::temporary("/");
        }
    };

    if HeaderValue::from_bytes(original_url.as_bytes()).is_err() {
        warn!(%short_code, "Stored URL is not a valid Location header");
        return Redirect::temporary("/");
    }

    match state.click_sender.try_send(ClickEvent::new(short_code)) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            warn!(short_code = %event.short_code, "Click queue full, dropping click");
        }
        Err(TrySendError::Closed(event)) => {
            warn!(short_code = %event.short_code, "Click worker stopped, dropping click");
        }
    }

    Redirect::temporary(&original_url)
}
