//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for the `urls` table.
///
/// Short-code generation and click increments are delegated to database
/// functions so that uniqueness and atomicity stay server-side.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Lists every row, newest first. Used by the admin CLI.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_all(&self) -> Result<Vec<ShortUrl>, AppError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, user_id, original_url, short_code, clicks::bigint AS clicks, created_at, is_custom
            FROM urls
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ShortUrl::from).collect())
    }

    /// Deletes a row by short code regardless of owner. Used by the admin CLI.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_by_code(&self, short_code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE short_code = $1")
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(FromRow)]
struct UrlRow {
    id: Uuid,
    user_id: Uuid,
    original_url: String,
    short_code: String,
    clicks: i64,
    created_at: DateTime<Utc>,
    is_custom: bool,
}

impl From<UrlRow> for ShortUrl {
    fn from(r: UrlRow) -> Self {
        ShortUrl {
            id: r.id,
            user_id: r.user_id,
            original_url: r.original_url,
            short_code: r.short_code,
            clicks: r.clicks,
            created_at: r.created_at,
            is_custom: r.is_custom,
        }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, user_id, original_url, short_code, clicks::bigint AS clicks, created_at, is_custom
            FROM urls
            WHERE user_id = $1
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, user_id, original_url, short_code, clicks::bigint AS clicks, created_at, is_custom
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, user_id, original_url, short_code, clicks::bigint AS clicks, created_at, is_custom
            FROM urls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }

    async fn original_url(&self, short_code: &str) -> Result<Option<String>, AppError> {
        let url = sqlx::query_scalar::<_, String>(
            "SELECT original_url FROM urls WHERE short_code = $1",
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn generate_short_code(&self) -> Result<String, AppError> {
        let code = sqlx::query_scalar::<_, String>("SELECT generate_short_code()")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(code)
    }

    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (user_id, original_url, short_code, is_custom)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, original_url, short_code, clicks::bigint AS clicks, created_at, is_custom
            "#,
        )
        .bind(new_url.user_id)
        .bind(&new_url.original_url)
        .bind(&new_url.short_code)
        .bind(new_url.is_custom)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ShortUrl>, AppError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, user_id, original_url, short_code, clicks::bigint AS clicks, created_at, is_custom
            FROM urls
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ShortUrl::from).collect())
    }

    async fn clicks_by_user(&self, user_id: Uuid) -> Result<Vec<i64>, AppError> {
        let clicks = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(clicks, 0)::bigint FROM urls WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(clicks)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<(), AppError> {
        sqlx::query("SELECT increment_url_clicks($1)")
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
