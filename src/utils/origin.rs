//! Public origin resolution for building short links.

use crate::AppError;
use axum::http::{HeaderMap, header};

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Resolves the origin (`scheme://host[:port]`) under which short links are served.
///
/// A configured `PUBLIC_BASE_URL` always wins. Otherwise the origin is taken
/// from the request the browser made, the same way a client would read
/// `window.location.origin`:
///
/// - host from `Host`; the port is kept
/// - scheme `http`
///
/// With `trust_forwarded` (set only when running behind a proxy) the host
/// comes from `X-Forwarded-Host` and the scheme from `X-Forwarded-Proto`,
/// first value each, when present. Without it both headers are ignored
/// since any client can send them.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no configured origin exists and the
/// host headers are missing or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "localhost:3000".parse().unwrap());
///
/// assert_eq!(request_origin(&headers, None, false).unwrap(), "http://localhost:3000");
/// ```
pub fn request_origin(
    headers: &HeaderMap,
    configured: Option<&str>,
    trust_forwarded: bool,
) -> Result<String, AppError> {
    if let Some(base) = configured {
        return Ok(base.trim_end_matches('/').to_string());
    }

    let forwarded = |name: &str| headers.get(name).filter(|_| trust_forwarded);

    let host = forwarded(X_FORWARDED_HOST)
        .or_else(|| headers.get(header::HOST))
        .ok_or_else(|| AppError::bad_request("Missing Host header", serde_json::json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", serde_json::json!({})))?
        .split(',')
        .next()
        .unwrap_or_default()
        .trim();

    if host.is_empty() {
        return Err(AppError::bad_request(
            "Missing Host header",
            serde_json::json!({}),
        ));
    }

    let scheme = forwarded(X_FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| *v == "http" || *v == "https")
        .unwrap_or("http");

    Ok(format!("{}://{}", scheme, host))
}
