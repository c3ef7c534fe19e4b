//! Session authentication for the JSON API.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{error::AppError, state::AppState, web::session::resolve_user};

/// Authenticates API requests from the session cookies.
///
/// On success the [`crate::web::session::CurrentUser`] is inserted as a
/// request extension. If the access token had to be refreshed, the new
/// cookies ride along on the response.
///
/// # Errors
///
/// Returns `401 Unauthorized` as JSON when there is no usable session, so the
/// page script can send the user back to `/auth`.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/urls", get(list_urls_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<(CookieJar, Response), AppError> {
    let (user, jar) = resolve_user(&st, jar).await?;

    req.extensions_mut().insert(user);

    Ok((jar, next.run(req).await))
}
