//! Short URL entity representing one row of the `urls` table.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A shortened URL owned by a single user.
///
/// Uniqueness of `short_code` and of `user_id` is enforced by the database,
/// not by this type.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortUrl {
    pub id: Uuid,
    pub user_id: Uuid,
    pub original_url: String,
    pub short_code: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub is_custom: bool,
}

impl ShortUrl {
    /// Builds the public short link for this row under `origin`.
    ///
    /// `origin` is a scheme + host (+ port) string such as
    /// `https://lnk.example.com`; a trailing slash is tolerated.
    pub fn short_url(&self, origin: &str) -> String {
        format!("{}/{}", origin.trim_end_matches('/'), self.short_code)
    }
}

/// Input data for inserting a new short URL.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShortUrl {
    pub user_id: Uuid,
    pub original_url: String,
    pub short_code: String,
    pub is_custom: bool,
}
