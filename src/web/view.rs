//! Display models for the dashboard templates.

use uuid::Uuid;

use crate::domain::entities::ShortUrl;

/// One card in the URL list.
#[derive(Debug, Clone)]
pub struct UrlCardView {
    pub id: Uuid,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub clicks: i64,
    /// Creation date as shown on the card, e.g. `Oct 19, 2026`.
    pub created_on: String,
    pub is_custom: bool,
}

impl UrlCardView {
    pub fn new(url: &ShortUrl, origin: &str) -> Self {
        Self {
            id: url.id,
            original_url: url.original_url.clone(),
            short_code: url.short_code.clone(),
            short_url: url.short_url(origin),
            clicks: url.clicks,
            created_on: url.created_at.format("%b %-d, %Y").to_string(),
            is_custom: url.is_custom,
        }
    }

    pub fn from_list(urls: &[ShortUrl], origin: &str) -> Vec<Self> {
        urls.iter().map(|url| Self::new(url, origin)).collect()
    }
}
