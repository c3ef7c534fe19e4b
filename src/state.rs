//! Shared application state injected into every handler.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AuthService, UrlService};
use crate::domain::click_event::ClickEvent;
use crate::infrastructure::notifications::UrlEventBus;

/// Handler-facing state.
///
/// Cloned per request; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    pub auth_service: Arc<AuthService>,
    /// Producer side of the bounded click queue drained by the click worker.
    pub click_sender: mpsc::Sender<ClickEvent>,
    pub events: UrlEventBus,
    /// Configured origin for short links; `None` derives it per request.
    pub public_base_url: Option<String>,
    /// Honor `X-Forwarded-Host`/`X-Forwarded-Proto`; only set behind a proxy.
    pub trust_forwarded_headers: bool,
    pub cookie_secure: bool,
}
