//! HTTP error response conversion
//!
//! Wraps `AppError` so it can implement `IntoResponse` (orphan rules: both
//! the trait and the error type live in other crates). Every internal failure
//! is logged server-side at its declared level and mapped to a client-safe
//! JSON body; stack traces, paths, and decoder detail never leave the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use imgpress_core::{AppError, ErrorMetadata, LogLevel};
use imgpress_processing::ProcessingError;
use imgpress_storage::StorageError;
use serde::Serialize;

/// Failure body: `{ "success": false, "message": "..." }`
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub message: String,
}

/// Wrapper type for AppError to implement IntoResponse
#[derive(Debug)]
pub struct HttpError(pub AppError);

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        HttpError(err)
    }
}

impl From<ProcessingError> for HttpError {
    fn from(err: ProcessingError) -> Self {
        let app = match err {
            ProcessingError::Storage(e) => AppError::Storage(e.to_string()),
            other => AppError::Processing(other.to_string()),
        };
        HttpError(app)
    }
}

impl From<StorageError> for HttpError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(key) => AppError::NotFound(format!("File not found: {key}")),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            other => AppError::Storage(other.to_string()),
        };
        HttpError(app)
    }
}

fn log_error(error: &AppError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code = code, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code = code, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, code = code, "Request failed");
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Full detail goes to the log; the body carries the client message only.
        log_error(app_error);

        let body = Json(FailureResponse {
            success: false,
            message: app_error.client_message(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error_not_found() {
        let HttpError(app) = StorageError::NotFound("a.webp".to_string()).into();
        assert!(matches!(app, AppError::NotFound(_)));
        assert_eq!(app.http_status_code(), 404);
    }

    #[test]
    fn test_from_storage_error_invalid_key() {
        let HttpError(app) = StorageError::InvalidKey("bad key".to_string()).into();
        assert!(matches!(app, AppError::InvalidInput(_)));
        assert_eq!(app.http_status_code(), 400);
    }

    #[test]
    fn test_processing_errors_map_to_500_with_generic_message() {
        let HttpError(app) = ProcessingError::InvalidImage("truncated jpeg".to_string()).into();
        assert_eq!(app.http_status_code(), 500);
        assert_eq!(app.client_message(), "Image upload failed");
    }

    #[test]
    fn test_processing_storage_error_keeps_storage_code() {
        let inner = StorageError::UploadFailed("disk full".to_string());
        let HttpError(app) = ProcessingError::Storage(inner).into();
        assert_eq!(app.error_code(), "STORAGE_ERROR");
        assert_eq!(app.http_status_code(), 500);
    }
}
