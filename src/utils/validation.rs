//! Input validation for the shorten form.
//!
//! All checks here run before any call to the hosted backend.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Accepted long URL shape: an explicit `http` or `https` scheme followed by anything.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://.+").unwrap());

/// Accepted custom short code shape.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{3,20}$").unwrap());

/// Codes that would shadow the application's own top-level routes.
const RESERVED_CODES: &[&str] = &[
    "analytics",
    "api",
    "auth",
    "health",
    "logout",
    "static",
    "urls",
];

/// Validates the long URL entered by the user and returns it trimmed.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the URL is blank, does not start
/// with `http://` or `https://`, or contains control characters (which
/// cannot be sent back in a `Location` header).
pub fn validate_url(raw: &str) -> Result<&str, AppError> {
    let url = raw.trim();

    if url.is_empty() {
        return Err(AppError::bad_request("Please enter a URL", json!({})));
    }

    if !URL_REGEX.is_match(url) || url.chars().any(char::is_control) {
        return Err(AppError::bad_request(
            "Please enter a valid URL (starting with http:// or https://)",
            json!({ "url": url }),
        ));
    }

    Ok(url)
}

/// Validates a user-chosen short code.
///
/// # Rules
///
/// - 3-20 characters
/// - Letters, digits, hyphens and underscores only
/// - Not one of the application's route names
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_code("my-custom_code").is_ok());
/// assert!(validate_custom_code("ab").is_err());      // Too short
/// assert!(validate_custom_code("has space").is_err());
/// assert!(validate_custom_code("api").is_err());     // Reserved
/// ```
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !CUSTOM_CODE_REGEX.is_match(code) {
        return Err(AppError::bad_request(
            "Custom code must be 3-20 characters (letters, numbers, hyphens, underscores)",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
