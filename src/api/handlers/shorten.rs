//! Handler for the shorten endpoint.

use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};

use crate::api::dto::urls::{ShortenRequest, ShortenResponse, UrlResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::origin::request_origin;
use crate::web::session::CurrentUser;

/// Creates the signed-in user's short URL.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/very/long/url",
///   "use_custom_code": true,
///   "custom_code": "my-link"
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "message": "URL shortened successfully!",
///   "url": {
///     "id": "5b7c...",
///     "original_url": "https://example.com/very/long/url",
///     "short_code": "my-link",
///     "short_url": "https://lnk.example.com/my-link",
///     "clicks": 0,
///     "created_at": "2026-10-19T10:00:00Z",
///     "is_custom": true
///   }
/// }
/// ```
///
/// # Errors
///
/// - `400` for a blank or malformed URL or custom code
/// - `409` when the user already has a URL or the custom code is taken
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let origin = request_origin(
        &headers,
        state.public_base_url.as_deref(),
        state.trust_forwarded_headers,
    )?;

    let created = state.url_service.shorten(user.id, payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            message: "URL shortened successfully!",
            url: UrlResponse::new(created, &origin),
        }),
    ))
}
