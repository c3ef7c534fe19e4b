//! Dashboard page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    analytics_handler, auth_page_handler, dashboard_handler, logout_handler, sign_in_handler,
    sign_up_handler, url_list_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Pages requiring a session.
///
/// Protected via [`crate::web::middleware::web_auth`], which redirects to
/// `/auth` when there is no session.
///
/// # Endpoints
///
/// - `GET /` - Dashboard
/// - `GET /urls` - URL list fragment
/// - `GET /analytics` - Analytics cards fragment
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/urls", get(url_list_handler))
        .route("/analytics", get(analytics_handler))
}

/// Public pages.
///
/// # Endpoints
///
/// - `GET  /auth` - Sign-in / sign-up page
/// - `POST /auth/sign-in` - Sign in
/// - `POST /auth/sign-up` - Create an account
/// - `POST /logout` - Sign out
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth", get(auth_page_handler))
        .route("/auth/sign-in", post(sign_in_handler))
        .route("/auth/sign-up", post(sign_up_handler))
        .route("/logout", post(logout_handler))
}
