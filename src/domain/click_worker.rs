//! Background worker applying click increments.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;

/// Drains the click channel and calls the remote increment function for each event.
///
/// Failures are logged and the event is discarded; redirects have already been
/// answered by the time an event is processed. Returns when every sender has
/// been dropped.
pub async fn run_click_worker(mut rx: mpsc::Receiver<ClickEvent>, repository: Arc<dyn UrlRepository>) {
    while let Some(event) = rx.recv().await {
        match repository.increment_clicks(&event.short_code).await {
            Ok(()) => debug!(short_code = %event.short_code, "Click recorded"),
            Err(e) => warn!(short_code = %event.short_code, "Failed to record click: {}", e),
        }
    }

    info!("Click worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::error::AppError;
    use serde_json::json;

    #[tokio::test]
    async fn test_worker_increments_each_event() {
        let mut repo = MockUrlRepository::new();
        repo.expect_increment_clicks()
            .withf(|code| code == "abc123")
            .times(2)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(10);
        tx.send(ClickEvent::new("abc123")).await.unwrap();
        tx.send(ClickEvent::new("abc123")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(repo)).await;
    }

    #[tokio::test]
    async fn test_worker_continues_after_failure() {
        let mut repo = MockUrlRepository::new();
        repo.expect_increment_clicks()
            .withf(|code| code == "broken")
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        repo.expect_increment_clicks()
            .withf(|code| code == "fine")
            .times(1)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(10);
        tx.send(ClickEvent::new("broken")).await.unwrap();
        tx.send(ClickEvent::new("fine")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(repo)).await;
    }
}
