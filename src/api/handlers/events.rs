//! Server-sent events telling open dashboards to refresh.

use axum::{
    Extension,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use std::{convert::Infallible, time::Duration};
use tokio_stream::{
    Stream, StreamExt,
    wrappers::{BroadcastStream, errors::BroadcastStreamRecvError},
};
use tracing::debug;

use crate::state::AppState;
use crate::web::session::CurrentUser;

/// Streams the signed-in user's URL changes.
///
/// # Endpoint
///
/// `GET /api/events`
///
/// # Events
///
/// - `url` with a JSON body such as `{"kind":"created","user_id":"..."}` for
///   every change to one of the user's rows, whether it came from this
///   process or from a database notification
/// - `resync` when the subscriber fell behind and missed events
///
/// The page refetches its list on either event. A keep-alive comment is sent
/// every 15 seconds.
pub async fn events_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let user_id = user.id;
    debug!(%user_id, "Event stream opened");

    let stream = BroadcastStream::new(state.events.subscribe()).filter_map(move |msg| {
        let event = match msg {
            Ok(event) if event.user_id == user_id => Event::default()
                .event("url")
                .data(serde_json::to_string(&event).unwrap_or_default()),
            Ok(_) => return None,
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                debug!(%user_id, skipped, "Event stream lagged");
                Event::default().event("resync").data("{}")
            }
        };

        Some(Ok::<Event, Infallible>(event))
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
