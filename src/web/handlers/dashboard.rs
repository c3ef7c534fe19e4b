//! Dashboard home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, extract::State, http::HeaderMap};

use crate::domain::entities::UrlAnalytics;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::origin::request_origin;
use crate::web::session::CurrentUser;
use crate::web::view::UrlCardView;

/// Template for the dashboard home page.
///
/// Renders `templates/dashboard.html` with:
/// - The signed-in user's email and a sign-out button
/// - Click analytics
/// - The shortener form
/// - The URL list
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub email: String,
    pub analytics: UrlAnalytics,
    pub urls: Vec<UrlCardView>,
}

/// Renders the dashboard home page.
///
/// # Endpoint
///
/// `GET /`
///
/// Analytics are derived from the same rows as the list, so both always agree.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    headers: HeaderMap,
) -> Result<DashboardTemplate, AppError> {
    let origin = request_origin(
        &headers,
        state.public_base_url.as_deref(),
        state.trust_forwarded_headers,
    )?;
    let urls = state.url_service.list_for_user(user.id).await?;

    Ok(DashboardTemplate {
        email: user.email.unwrap_or_default(),
        analytics: UrlAnalytics::from_clicks(urls.iter().map(|u| u.clicks)),
        urls: UrlCardView::from_list(&urls, &origin),
    })
}
