//! GoTrue REST implementation of the auth provider.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::domain::entities::{AuthUser, Session};
use crate::domain::repositories::AuthProvider;
use crate::error::AppError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for a GoTrue auth server.
///
/// Every request carries the project's public `apikey`; user-scoped calls
/// additionally send the session's access token as a bearer token.
pub struct GoTrueClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

/// Error payload shapes returned by GoTrue across versions.
#[derive(Debug, Default, Deserialize)]
struct GoTrueError {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl GoTrueError {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}

impl GoTrueClient {
    /// Creates a client for the project at `base_url` (e.g. `https://xyz.supabase.co`).
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL or the HTTP
    /// client cannot be constructed.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        self.base_url.join(path).map_err(|e| {
            AppError::internal(
                "Auth service misconfigured",
                json!({ "reason": e.to_string() }),
            )
        })
    }

    async fn token_grant(&self, grant_type: &str, body: serde_json::Value) -> Result<Session, AppError> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", grant_type);

        let response = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Invalid login credentials").await);
        }

        Ok(response.json::<Session>().await?)
    }
}

/// Converts a non-success GoTrue response into an [`AppError`].
///
/// Client errors become [`AppError::Unauthorized`] (or Validation for 422)
/// carrying the server's message when one is present; server errors become
/// [`AppError::Internal`].
async fn error_from_response(response: Response, fallback: &str) -> AppError {
    let status = response.status();
    let body = response.json::<GoTrueError>().await.unwrap_or_default();
    let message = body.into_message().unwrap_or_else(|| fallback.to_string());

    debug!(%status, "Auth service rejected request: {}", message);

    match status {
        StatusCode::UNPROCESSABLE_ENTITY => {
            AppError::bad_request(message, json!({ "status": status.as_u16() }))
        }
        s if s.is_client_error() => {
            AppError::unauthorized(message, json!({ "status": status.as_u16() }))
        }
        _ => {
            warn!(%status, "Auth service error: {}", message);
            AppError::internal("Auth service unavailable", json!({ "status": status.as_u16() }))
        }
    }
}

#[async_trait]
impl AuthProvider for GoTrueClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        self.token_grant("password", json!({ "email": email, "password": password }))
            .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, AppError> {
        let response = self
            .http
            .post(self.endpoint("auth/v1/signup")?)
            .header("apikey", &self.api_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Sign up failed").await);
        }

        // Projects with email confirmation enabled answer with the bare user object.
        let body = response.json::<serde_json::Value>().await?;
        Ok(serde_json::from_value::<Session>(body).ok())
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AppError> {
        let response = self
            .http
            .get(self.endpoint("auth/v1/user")?)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Invalid or expired session").await);
        }

        Ok(response.json::<AuthUser>().await?)
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AppError> {
        self.token_grant("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.endpoint("auth/v1/logout")?)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        // An already-expired session is as good as signed out.
        if response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED {
            return Ok(());
        }

        Err(error_from_response(response, "Failed to sign out").await)
    }
}
