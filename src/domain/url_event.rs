//! Change notifications for a user's short URLs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of change applied to a `urls` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlEventKind {
    Created,
    Updated,
    Deleted,
}

/// A change to one of `user_id`'s rows.
///
/// Published locally after a successful shorten or delete, and relayed from the
/// database's `urls_changes` notification channel for changes made elsewhere.
/// Subscribers only use it as a signal to refetch the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlEvent {
    pub kind: UrlEventKind,
    pub user_id: Uuid,
}

impl UrlEvent {
    pub fn created(user_id: Uuid) -> Self {
        Self {
            kind: UrlEventKind::Created,
            user_id,
        }
    }

    pub fn deleted(user_id: Uuid) -> Self {
        Self {
            kind: UrlEventKind::Deleted,
            user_id,
        }
    }

    /// Parses a `NOTIFY` payload of the form `{"op": "INSERT", "user_id": "..."}`.
    ///
    /// Returns `None` for malformed payloads or unknown operations.
    pub fn from_notification(payload: &str) -> Option<Self> {
        #[derive(Deserialize)]
        struct Notification {
            op: String,
            user_id: Uuid,
        }

        let notification: Notification = serde_json::from_str(payload).ok()?;
        let kind = match notification.op.as_str() {
            "INSERT" => UrlEventKind::Created,
            "UPDATE" => UrlEventKind::Updated,
            "DELETE" => UrlEventKind::Deleted,
            _ => return None,
        };

        Some(Self {
            kind,
            user_id: notification.user_id,
        })
    }
}
