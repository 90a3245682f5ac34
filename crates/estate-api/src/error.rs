//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use estate_core::error::{AppError, ErrorKind};

/// Message sent for every server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable message.
    pub message: String,
}

/// An [`AppError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// HTTP status for an error kind.
    pub fn status_for(kind: ErrorKind) -> StatusCode {
        match kind {
            ErrorKind::Validation | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Storage
            | ErrorKind::Configuration
            | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = Self::status_for(err.kind);

        let message = if err.kind.is_client_error() {
            tracing::debug!(kind = %err.kind, message = %err.message, "Request rejected");
            err.message
        } else {
            tracing::error!(
                kind = %err.kind,
                message = %err.message,
                source = ?err.source,
                "Request failed"
            );
            INTERNAL_ERROR_MESSAGE.to_string()
        };

        (status, Json(ApiErrorResponse { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::status_for(ErrorKind::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::status_for(ErrorKind::Conflict), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::status_for(ErrorKind::Authentication), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::status_for(ErrorKind::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::status_for(ErrorKind::Database),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_server_errors_are_masked() {
        let response = ApiError(AppError::database("relation \"users\" does not exist")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Internal server error." }));
    }

    #[tokio::test]
    async fn test_client_errors_keep_message() {
        let response = ApiError(AppError::conflict("User already exists.")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "User already exists.");
    }
}
