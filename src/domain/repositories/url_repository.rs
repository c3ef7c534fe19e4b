//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Access to the `urls` table and its server-side functions.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - hosted PostgreSQL
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Returns the user's row, if they already have one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<ShortUrl>, AppError>;

    /// Finds a row by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Finds a row by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShortUrl>, AppError>;

    /// Looks up only the target URL for a short code. Used on the redirect path.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn original_url(&self, short_code: &str) -> Result<Option<String>, AppError>;

    /// Calls the remote `generate_short_code()` function.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the call fails.
    async fn generate_short_code(&self) -> Result<String, AppError>;

    /// Inserts a new row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] carrying the violated constraint name when
    /// the short code or the user already has a row.
    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Lists the user's rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ShortUrl>, AppError>;

    /// Returns the click counter of each of the user's rows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn clicks_by_user(&self, user_id: Uuid) -> Result<Vec<i64>, AppError>;

    /// Deletes a row owned by `user_id`.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError>;

    /// Calls the remote `increment_url_clicks(url_short_code)` function.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the call fails.
    async fn increment_clicks(&self, short_code: &str) -> Result<(), AppError>;

    /// Round-trips a trivial query to check connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the database is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
