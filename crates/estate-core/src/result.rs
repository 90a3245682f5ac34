//! Convenience result type alias for Estate Hub.

use crate::error::AppError;

/// A specialized `Result` type for Estate Hub operations.
pub type AppResult<T> = Result<T, AppError>;
