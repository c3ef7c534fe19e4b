//! Handlers for listing and deleting the user's URLs.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::HeaderMap,
};
use uuid::Uuid;

use crate::api::dto::urls::{MessageResponse, UrlListResponse, UrlResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::origin::request_origin;
use crate::web::session::CurrentUser;

/// Lists the signed-in user's URLs, newest first.
///
/// # Endpoint
///
/// `GET /api/urls`
pub async fn list_urls_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    headers: HeaderMap,
) -> Result<Json<UrlListResponse>, AppError> {
    let origin = request_origin(
        &headers,
        state.public_base_url.as_deref(),
        state.trust_forwarded_headers,
    )?;

    let items = state
        .url_service
        .list_for_user(user.id)
        .await?
        .into_iter()
        .map(|url| UrlResponse::new(url, &origin))
        .collect();

    Ok(Json(UrlListResponse { items }))
}

/// Deletes one of the signed-in user's URLs.
///
/// # Endpoint
///
/// `DELETE /api/urls/{id}`
///
/// # Errors
///
/// Returns `404` if the URL does not exist or belongs to another user.
pub async fn delete_url_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.url_service.delete(user.id, id).await?;

    Ok(Json(MessageResponse {
        message: "URL deleted successfully",
    }))
}
