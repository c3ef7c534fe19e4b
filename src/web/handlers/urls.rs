//! HTML fragments refreshed by the page script.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, extract::State, http::HeaderMap};

use crate::domain::entities::UrlAnalytics;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::origin::request_origin;
use crate::web::session::CurrentUser;
use crate::web::view::UrlCardView;

#[derive(Template, WebTemplate)]
#[template(path = "url_list.html")]
pub struct UrlListTemplate {
    pub urls: Vec<UrlCardView>,
}

#[derive(Template, WebTemplate)]
#[template(path = "analytics.html")]
pub struct AnalyticsTemplate {
    pub analytics: UrlAnalytics,
}

/// Renders the URL list fragment: an empty state or one card per URL.
///
/// # Endpoint
///
/// `GET /urls`
pub async fn url_list_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    headers: HeaderMap,
) -> Result<UrlListTemplate, AppError> {
    let origin = request_origin(
        &headers,
        state.public_base_url.as_deref(),
        state.trust_forwarded_headers,
    )?;
    let urls = state.url_service.list_for_user(user.id).await?;

    Ok(UrlListTemplate {
        urls: UrlCardView::from_list(&urls, &origin),
    })
}

/// Renders the three analytics cards.
///
/// # Endpoint
///
/// `GET /analytics`
pub async fn analytics_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<AnalyticsTemplate, AppError> {
    let analytics = state.url_service.analytics(user.id).await?;
    Ok(AnalyticsTemplate { analytics })
}
