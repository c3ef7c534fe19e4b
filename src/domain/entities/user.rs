//! Identity types returned by the remote auth service.

use serde::Deserialize;
use uuid::Uuid;

/// An authenticated user as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// A signed-in session: bearer tokens plus the user they belong to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}
