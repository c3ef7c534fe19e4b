//! In-process broadcast of URL change events.

use tokio::sync::broadcast;
use tracing::trace;

use crate::domain::url_event::UrlEvent;

/// Default number of events buffered per subscriber before lagging ones skip ahead.
pub const DEFAULT_CAPACITY: usize = 256;

/// Fan-out hub for [`UrlEvent`]s.
///
/// Cloning is cheap; all clones publish into the same channel. Publishing with
/// no subscribers is not an error. Subscribers that fall behind lose the oldest
/// events, which is harmless because every event only triggers a refetch.
#[derive(Clone)]
pub struct UrlEventBus {
    sender: broadcast::Sender<UrlEvent>,
}

impl UrlEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn publish(&self, event: UrlEvent) {
        let receivers = self.sender.send(event).unwrap_or(0);
        trace!(?event, receivers, "Published URL event");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UrlEvent> {
        self.sender.subscribe()
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for UrlEventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
