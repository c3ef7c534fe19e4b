//! Translation of unique-constraint violations into user-facing conflicts.

use crate::error::AppError;
use serde_json::json;

/// Unique constraint on `urls.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "urls_short_code_key";

/// Unique constraint on `urls.user_id`.
pub const USER_CONSTRAINT: &str = "urls_user_id_key";

pub const CODE_TAKEN_MESSAGE: &str = "This custom code is already taken";
pub const ALREADY_HAS_URL_MESSAGE: &str =
    "You already have a shortened URL. Each user can only create one URL.";

/// Rewrites a conflict raised by an insert into `urls` into the message shown to the user.
///
/// A violation on the short code means the code was claimed between the
/// availability check and the insert. Every other unique violation is
/// reported as the one-URL-per-user limit. Non-conflict errors pass through.
pub fn map_insert_conflict(err: AppError) -> AppError {
    match err.constraint() {
        Some(SHORT_CODE_CONSTRAINT) => {
            AppError::conflict(CODE_TAKEN_MESSAGE, json!({ "constraint": SHORT_CODE_CONSTRAINT }))
        }
        _ if matches!(err, AppError::Conflict { .. }) => AppError::conflict(
            ALREADY_HAS_URL_MESSAGE,
            json!({ "constraint": err.constraint() }),
        ),
        _ => err,
    }
}
