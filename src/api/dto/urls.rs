//! DTOs for the short URL endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::services::ShortenInput;
use crate::domain::entities::ShortUrl;

/// Body of `POST /api/urls`.
///
/// `custom_code` is only considered when `use_custom_code` is set.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,

    #[serde(default)]
    pub custom_code: Option<String>,

    #[serde(default)]
    pub use_custom_code: bool,
}

impl From<ShortenRequest> for ShortenInput {
    fn from(req: ShortenRequest) -> Self {
        Self {
            url: req.url,
            custom_code: req.custom_code,
            use_custom_code: req.use_custom_code,
        }
    }
}

/// A short URL as returned to the dashboard script.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub id: Uuid,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub is_custom: bool,
}

impl UrlResponse {
    pub fn new(url: ShortUrl, origin: &str) -> Self {
        let short_url = url.short_url(origin);

        Self {
            id: url.id,
            original_url: url.original_url,
            short_code: url.short_code,
            short_url,
            clicks: url.clicks,
            created_at: url.created_at,
            is_custom: url.is_custom,
        }
    }
}

/// Response of `POST /api/urls`.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub message: &'static str,
    pub url: UrlResponse,
}

/// Response of `GET /api/urls`.
#[derive(Debug, Serialize)]
pub struct UrlListResponse {
    pub items: Vec<UrlResponse>,
}

/// Plain acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
