//! Liveness and dependency probe.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Probes the database and the click queue.
///
/// # Endpoint
///
/// `GET /health`
///
/// Answers `200` when both checks pass and `503` otherwise; the body is the
/// same [`HealthResponse`] either way:
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" },
///     "click_queue": { "status": "ok", "message": "Available: 10000/10000" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let checks = HealthChecks {
        database: database_check(&state).await,
        click_queue: click_queue_check(&state),
    };

    let status = if checks.all_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(HealthResponse::new(checks)))
}

async fn database_check(state: &AppState) -> CheckStatus {
    match state.url_service.health_check().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => {
            tracing::error!("Health check: database unreachable: {}", e);
            CheckStatus::error(format!("Database error: {}", e))
        }
    }
}

/// A closed channel means the worker died; zero free slots means clicks are
/// being dropped.
fn click_queue_check(state: &AppState) -> CheckStatus {
    let sender = &state.click_sender;

    if sender.is_closed() {
        return CheckStatus::error("Click worker stopped");
    }

    match (sender.capacity(), sender.max_capacity()) {
        (0, max) => CheckStatus::error(format!("Queue full: 0/{}", max)),
        (free, max) => CheckStatus::ok(format!("Available: {}/{}", free, max)),
    }
}
