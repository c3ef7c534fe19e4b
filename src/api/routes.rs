//! API route configuration.
//!
//! All API endpoints require a session via [`crate::api::middleware::auth`].

use crate::api::handlers::{
    delete_url_handler, events_handler, list_urls_handler, qr_png_handler, qr_svg_handler,
    shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// All API routes, protected by the session cookies.
///
/// # Endpoints
///
/// - `GET    /urls`              - List the user's URLs
/// - `POST   /urls`              - Create the user's short URL
/// - `DELETE /urls/{id}`         - Delete one of the user's URLs
/// - `GET    /urls/{id}/qr.svg`  - QR code as SVG
/// - `GET    /urls/{id}/qr.png`  - QR code as downloadable PNG
/// - `GET    /events`            - Server-sent change events
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", get(list_urls_handler).post(shorten_handler))
        .route("/urls/{id}", delete(delete_url_handler))
        .route("/urls/{id}/qr.svg", get(qr_svg_handler))
        .route("/urls/{id}/qr.png", get(qr_png_handler))
        .route("/events", get(events_handler))
}
