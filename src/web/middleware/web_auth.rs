//! Session gate for the dashboard pages.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tracing::debug;

use crate::state::AppState;
use crate::web::session::resolve_user;

/// Authenticates page requests from the session cookies.
///
/// # Authentication Flow
///
/// 1. Read the `sb-access-token` and `sb-refresh-token` cookies
/// 2. Check the access token with the auth service, refreshing it once if rejected
/// 3. On success, insert [`crate::web::session::CurrentUser`] and continue;
///    refreshed tokens are written back as cookies
/// 4. Otherwise redirect to `/auth`
///
/// # Differences from API Auth
///
/// Unlike the API session middleware which returns `401 Unauthorized`,
/// this middleware redirects to the sign-in page.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/", get(dashboard_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), web_auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<(CookieJar, Response), Redirect> {
    match resolve_user(&st, jar).await {
        Ok((user, jar)) => {
            req.extensions_mut().insert(user);
            Ok((jar, next.run(req).await))
        }
        Err(e) => {
            debug!("Page session rejected: {}", e);
            Err(Redirect::to("/auth"))
        }
    }
}
