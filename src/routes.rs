//! The complete route table.
//!
//! | Path | Access | Served by |
//! |---|---|---|
//! | `GET /` | session, else redirect to `/auth` | dashboard page |
//! | `GET /urls`, `GET /analytics` | session, else redirect to `/auth` | dashboard fragments |
//! | `/auth*`, `POST /logout` | public | sign-in, sign-up, sign-out |
//! | `/api/*` | session, else `401` | JSON API and the SSE stream |
//! | `GET /health` | public | dependency probe |
//! | `/static/*` | public | page script and styles |
//! | `GET /{short_code}` | public | redirect |
//!
//! Static paths win over `/{short_code}`, which is why those names are
//! reserved as custom codes.

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// [`router`] with trailing slashes trimmed before routing.
///
/// `behind_proxy` switches rate limiting to forwarded client IPs; see
/// [`rate_limit::layer`].
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, behind_proxy))
}

/// All routes with their middleware.
///
/// Rate limiting keys on the peer address, so the service must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn router(state: AppState, behind_proxy: bool) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{short_code}", get(redirect_handler))
        .nest("/api", api_routes(&state, behind_proxy))
        .merge(page_routes(&state, behind_proxy))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}

fn api_routes(state: &AppState, behind_proxy: bool) -> Router<AppState> {
    api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::secure_layer(behind_proxy))
}

fn page_routes(state: &AppState, behind_proxy: bool) -> Router<AppState> {
    let gated = web::routes::protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        web_auth::layer,
    ));

    gated
        .merge(web::routes::public_routes())
        .layer(rate_limit::layer(behind_proxy))
}
