//! Typed path and query parameter helpers.

use estate_core::error::AppError;

/// Parses an integer row id from a path segment.
pub fn parse_id(s: &str) -> Result<i32, AppError> {
    s.trim()
        .parse::<i32>()
        .map_err(|_| AppError::validation(format!("Invalid id: {s}")))
}
