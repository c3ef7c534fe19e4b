//! Contract for the hosted session-based auth API.

use crate::domain::entities::{AuthUser, Session};
use crate::error::AppError;
use async_trait::async_trait;

/// Session operations delegated to the auth service.
///
/// # Implementations
///
/// - [`crate::infrastructure::auth::GoTrueClient`] - GoTrue REST API
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchanges an email and password for a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for wrong credentials.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError>;

    /// Registers a new account.
    ///
    /// Returns `Ok(None)` when the account was created but must be confirmed
    /// by email before a session is issued.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the auth service rejects the input.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, AppError>;

    /// Resolves the user owning an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for invalid or expired tokens.
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AppError>;

    /// Exchanges a refresh token for a fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when the refresh token is rejected.
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AppError>;

    /// Revokes the session behind an access token.
    ///
    /// # Errors
    ///
    /// Returns an error when the auth service cannot be reached.
    async fn sign_out(&self, access_token: &str) -> Result<(), AppError>;
}
