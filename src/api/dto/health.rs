//! Body of `GET /health`.

use serde::Serialize;

/// Overall verdict: `healthy` only when every check passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Ok,
    Error,
}

/// Result of probing one dependency.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: CheckState,
    pub message: String,
}

impl CheckStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: CheckState::Ok,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: CheckState::Error,
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == CheckState::Ok
    }
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    pub click_queue: CheckStatus,
}

impl HealthChecks {
    pub fn all_ok(&self) -> bool {
        self.database.is_ok() && self.click_queue.is_ok()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub checks: HealthChecks,
}

impl HealthResponse {
    pub fn new(checks: HealthChecks) -> Self {
        let status = if checks.all_ok() {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Degraded
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }
    }
}
