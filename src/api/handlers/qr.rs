//! QR code renderings of a short URL.

use axum::{
    Extension,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, header},
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::origin::request_origin;
use crate::utils::qr::{render_png, render_svg};
use crate::web::session::CurrentUser;

/// Resolves the full short URL for one of the user's rows.
async fn owned_short_url(
    state: &AppState,
    user: &CurrentUser,
    id: Uuid,
    headers: &HeaderMap,
) -> Result<(String, String), AppError> {
    let origin = request_origin(
        headers,
        state.public_base_url.as_deref(),
        state.trust_forwarded_headers,
    )?;
    let url = state.url_service.get_for_user(user.id, id).await?;

    Ok((url.short_url(&origin), url.short_code))
}

/// Renders the short URL as an SVG QR code for the card's dialog.
///
/// # Endpoint
///
/// `GET /api/urls/{id}/qr.svg`
pub async fn qr_svg_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let (short_url, _) = owned_short_url(&state, &user, id, &headers).await?;
    let svg = render_svg(&short_url)?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// Renders the short URL as a downloadable PNG QR code.
///
/// # Endpoint
///
/// `GET /api/urls/{id}/qr.png`
///
/// The response carries
/// `Content-Disposition: attachment; filename="qr-{short_code}.png"`.
pub async fn qr_png_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let (short_url, short_code) = owned_short_url(&state, &user, id, &headers).await?;
    let png = render_png(&short_url)?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"qr-{}.png\"",
        short_code
    ))
    .map_err(|_| AppError::internal("Invalid file name", json!({ "code": short_code })))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/png")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        png,
    ))
}
