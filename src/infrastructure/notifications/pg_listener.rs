//! Relay from PostgreSQL `LISTEN/NOTIFY` to the event bus.

use sqlx::PgPool;
use sqlx::postgres::PgListener;
use std::time::Duration;
use tracing::{debug, error, info};

use super::UrlEventBus;
use crate::domain::url_event::UrlEvent;

/// Notification channel the `urls` trigger publishes on.
pub const CHANGES_CHANNEL: &str = "urls_changes";

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Listens for row changes on `urls` and republishes them on `bus`.
///
/// Runs forever: a lost connection is logged and re-established after a short
/// delay. Payloads that do not parse are skipped.
pub async fn run_change_listener(pool: PgPool, bus: UrlEventBus) {
    loop {
        if let Err(e) = listen(&pool, &bus).await {
            error!("Change listener failed: {}", e);
        }

        tokio::time::sleep(RECONNECT_DELAY).await;
        info!("Reconnecting change listener");
    }
}

async fn listen(pool: &PgPool, bus: &UrlEventBus) -> Result<(), sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(CHANGES_CHANNEL).await?;
    info!("Listening for changes on '{}'", CHANGES_CHANNEL);

    loop {
        let notification = listener.recv().await?;

        match UrlEvent::from_notification(notification.payload()) {
            Some(event) => bus.publish(event),
            None => debug!(
                payload = notification.payload(),
                "Ignoring malformed change notification"
            ),
        }
    }
}
