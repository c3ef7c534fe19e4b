//! Short URL creation, listing, deletion and resolution.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::{NewShortUrl, ShortUrl, UrlAnalytics};
use crate::domain::repositories::UrlRepository;
use crate::domain::url_event::UrlEvent;
use crate::error::AppError;
use crate::infrastructure::notifications::UrlEventBus;
use crate::utils::db_error::{CODE_TAKEN_MESSAGE, map_insert_conflict};
use crate::utils::validation::{validate_custom_code, validate_url};

pub const ONE_URL_PER_USER_MESSAGE: &str =
    "You can only create one shortened URL. Please delete your existing URL first.";

/// What the user submitted through the shorten form.
#[derive(Debug, Clone, Default)]
pub struct ShortenInput {
    pub url: String,
    pub custom_code: Option<String>,
    pub use_custom_code: bool,
}

impl ShortenInput {
    /// The custom code to use, if custom mode is on and a non-blank code was given.
    fn requested_code(&self) -> Option<&str> {
        if !self.use_custom_code {
            return None;
        }

        self.custom_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Service for a user's short URLs.
///
/// Uniqueness of codes, the one-row-per-user rule and click atomicity are
/// owned by the database; the checks here only produce friendlier messages
/// before the insert and are not authoritative.
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
    events: UrlEventBus,
}

impl UrlService {
    pub fn new(repository: Arc<dyn UrlRepository>, events: UrlEventBus) -> Self {
        Self { repository, events }
    }

    /// Creates the user's short URL.
    ///
    /// # Flow
    ///
    /// 1. Validate the long URL and, in custom mode, the custom code
    /// 2. Reject users who already own a row
    /// 3. Reject a custom code that is already taken, or ask the database for a random one
    /// 4. Insert, mapping unique violations to user messages
    /// 5. Publish [`UrlEvent::created`] so open dashboards refresh
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a blank or malformed URL or custom code
    /// - [`AppError::Conflict`] when the user already has a URL or the code is taken
    /// - [`AppError::Internal`] when the backend fails
    pub async fn shorten(&self, user_id: Uuid, input: ShortenInput) -> Result<ShortUrl, AppError> {
        let original_url = validate_url(&input.url)?.to_string();
        let custom_code = input.requested_code();

        if let Some(code) = custom_code {
            validate_custom_code(code)?;
        }

        if self.repository.find_by_user(user_id).await?.is_some() {
            return Err(AppError::conflict(
                ONE_URL_PER_USER_MESSAGE,
                json!({ "user_id": user_id }),
            ));
        }

        let short_code = match custom_code {
            Some(code) => {
                if self.repository.find_by_code(code).await?.is_some() {
                    return Err(AppError::conflict(
                        CODE_TAKEN_MESSAGE,
                        json!({ "code": code }),
                    ));
                }
                code.to_string()
            }
            None => self.repository.generate_short_code().await?,
        };

        let new_url = NewShortUrl {
            user_id,
            original_url,
            short_code,
            is_custom: custom_code.is_some(),
        };

        let created = self
            .repository
            .insert(new_url)
            .await
            .map_err(map_insert_conflict)?;

        info!(%user_id, short_code = %created.short_code, "Short URL created");
        self.events.publish(UrlEvent::created(user_id));

        Ok(created)
    }

    /// Lists the user's URLs, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ShortUrl>, AppError> {
        self.repository.list_by_user(user_id).await
    }

    /// Fetches one of the user's URLs by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the row does not exist or belongs to
    /// someone else.
    pub async fn get_for_user(&self, user_id: Uuid, id: Uuid) -> Result<ShortUrl, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|url| url.user_id == user_id)
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "id": id })))
    }

    /// Deletes one of the user's URLs and publishes [`UrlEvent::deleted`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing owned by the user matched.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id, user_id).await? {
            return Err(AppError::not_found("URL not found", json!({ "id": id })));
        }

        info!(%user_id, %id, "Short URL deleted");
        self.events.publish(UrlEvent::deleted(user_id));

        Ok(())
    }

    /// Aggregates the user's click counters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    pub async fn analytics(&self, user_id: Uuid) -> Result<UrlAnalytics, AppError> {
        let clicks = self.repository.clicks_by_user(user_id).await?;
        Ok(UrlAnalytics::from_clicks(clicks))
    }

    /// Resolves a short code to its target URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    pub async fn resolve(&self, short_code: &str) -> Result<Option<String>, AppError> {
        let url = self.repository.original_url(short_code).await?;
        debug!(short_code, found = url.is_some(), "Resolved short code");
        Ok(url)
    }

    /// Checks that the backing database answers.
    ///
    /// # Errors
    ///
    /// Returns the underlying error when the database is unreachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
