//! Session cookies and the signed-in user.
//!
//! The auth service issues an access/refresh token pair; both live in
//! HttpOnly cookies so the page script never sees them.

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use uuid::Uuid;

use crate::application::services::Authenticated;
use crate::domain::entities::Session;
use crate::error::AppError;
use crate::state::AppState;

pub const ACCESS_COOKIE: &str = "sb-access-token";
pub const REFRESH_COOKIE: &str = "sb-refresh-token";

/// The user behind the current request, inserted as a request extension by
/// the session middlewares.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub access_token: String,
}

impl From<&Authenticated> for CurrentUser {
    fn from(auth: &Authenticated) -> Self {
        Self {
            id: auth.user.id,
            email: auth.user.email.clone(),
            access_token: auth.access_token.clone(),
        }
    }
}

fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Adds both session cookies to the jar.
pub fn store_session(jar: CookieJar, session: &Session, secure: bool) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_COOKIE,
        session.access_token.clone(),
        secure,
    ))
    .add(session_cookie(
        REFRESH_COOKIE,
        session.refresh_token.clone(),
        secure,
    ))
}

/// Removes both session cookies.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_COOKIE).path("/"))
        .remove(Cookie::build(REFRESH_COOKIE).path("/"))
}

/// Resolves the signed-in user from the session cookies.
///
/// When the access token had to be refreshed, the returned jar carries the
/// new cookies and must be sent back with the response.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] without a usable session and
/// [`AppError::Internal`] when the auth service is unreachable.
pub async fn resolve_user(
    state: &AppState,
    jar: CookieJar,
) -> Result<(CurrentUser, CookieJar), AppError> {
    let access = jar.get(ACCESS_COOKIE).map(|c| c.value().to_string());
    let refresh = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());

    let auth = state
        .auth_service
        .authenticate(access.as_deref(), refresh.as_deref())
        .await?;

    let user = CurrentUser::from(&auth);

    let jar = match auth.refreshed {
        Some(ref session) => store_session(jar, session, state.cookie_secure),
        None => jar,
    };

    Ok((user, jar))
}
