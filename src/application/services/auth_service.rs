//! Authentication service over the hosted auth provider.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{AuthUser, Session};
use crate::domain::repositories::AuthProvider;
use crate::error::AppError;

/// Result of a successful session check.
///
/// `refreshed` is set when the access token had expired and a new pair was
/// obtained with the refresh token; callers must hand the new tokens back to
/// the browser.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub user: AuthUser,
    pub access_token: String,
    pub refreshed: Option<Session>,
}

/// Service for signing users in and out and checking their sessions.
pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
}

impl AuthService {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }

    /// Resolves the current user from the session tokens.
    ///
    /// The access token is tried first. If the provider rejects it, one
    /// refresh is attempted with the refresh token.
    ///
    /// # Errors
    ///
    /// - [`AppError::Unauthorized`] if there is no usable session
    /// - [`AppError::Internal`] if the provider cannot be reached
    pub async fn authenticate(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> Result<Authenticated, AppError> {
        if let Some(token) = access_token.filter(|t| !t.is_empty()) {
            match self.provider.get_user(token).await {
                Ok(user) => {
                    return Ok(Authenticated {
                        user,
                        access_token: token.to_string(),
                        refreshed: None,
                    });
                }
                Err(AppError::Unauthorized { .. }) => {
                    debug!("Access token rejected, trying refresh");
                }
                Err(e) => return Err(e),
            }
        }

        let Some(refresh) = refresh_token.filter(|t| !t.is_empty()) else {
            return Err(AppError::unauthorized("Not signed in", json!({})));
        };

        let session = self.provider.refresh_session(refresh).await.map_err(|e| {
            warn!("Session refresh failed: {}", e);
            match e {
                AppError::Internal { .. } => e,
                _ => AppError::unauthorized("Session expired", json!({})),
            }
        })?;

        Ok(Authenticated {
            user: session.user.clone(),
            access_token: session.access_token.clone(),
            refreshed: Some(session),
        })
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the provider's rejection message as [`AppError::Unauthorized`].
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let session = self.provider.sign_in(email.trim(), password).await?;
        info!(user_id = %session.user.id, "User signed in");
        Ok(session)
    }

    /// Registers a new account.
    ///
    /// Returns `None` when the provider requires email confirmation before a
    /// session is issued.
    ///
    /// # Errors
    ///
    /// Returns the provider's rejection message.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, AppError> {
        let session = self.provider.sign_up(email.trim(), password).await?;
        info!(confirmed = session.is_some(), "User signed up");
        Ok(session)
    }

    /// Ends the session on the provider side.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] with "Failed to sign out" if the
    /// provider call fails.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        self.provider.sign_out(access_token).await.map_err(|e| {
            warn!("Sign out failed: {}", e);
            AppError::internal("Failed to sign out", json!({}))
        })
    }
}
