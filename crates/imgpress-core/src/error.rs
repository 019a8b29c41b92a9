//! Error types module
//!
//! The service-wide error taxonomy. All failures are unified under `AppError`,
//! and each variant self-describes its HTTP presentation through the
//! `ErrorMetadata` trait so the API layer never hand-picks status codes.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like resource limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "INVALID_FILE_TYPE")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from the internal error message)
    fn client_message(&self) -> String;

    /// Whether internal details must be hidden from the client
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    #[error("File too large: {0}")]
    FileTooLarge(String),

    #[error("Missing file: {0}")]
    MissingFile(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Image processing error: {0}")]
    Processing(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidFileType(_) => 400,
            AppError::FileTooLarge(_) => 413,
            AppError::MissingFile(_) => 400,
            AppError::InvalidInput(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Processing(_) => 500,
            AppError::Storage(_) => 500,
            AppError::Internal(_) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidFileType(_) => "INVALID_FILE_TYPE",
            AppError::FileTooLarge(_) => "FILE_TOO_LARGE",
            AppError::MissingFile(_) => "MISSING_FILE",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Processing(_) => "PROCESSING_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        // Validation errors carry their own message; server-side failures
        // always collapse to a generic message so internal detail (paths,
        // decoder errors) never leaks to the caller.
        match self {
            AppError::InvalidFileType(msg)
            | AppError::FileTooLarge(msg)
            | AppError::MissingFile(msg)
            | AppError::InvalidInput(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::Processing(_) | AppError::Storage(_) | AppError::Internal(_) => {
                "Image upload failed".to_string()
            }
        }
    }

    fn is_sensitive(&self) -> bool {
        matches!(
            self,
            AppError::Processing(_) | AppError::Storage(_) | AppError::Internal(_)
        )
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidFileType(_)
            | AppError::FileTooLarge(_)
            | AppError::MissingFile(_)
            | AppError::InvalidInput(_)
            | AppError::NotFound(_) => LogLevel::Debug,
            AppError::Processing(_) | AppError::Storage(_) | AppError::Internal(_) => {
                LogLevel::Error
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_client_errors() {
        assert_eq!(
            AppError::InvalidFileType("bad".into()).http_status_code(),
            400
        );
        assert_eq!(AppError::MissingFile("none".into()).http_status_code(), 400);
        assert_eq!(AppError::FileTooLarge("6MB".into()).http_status_code(), 413);
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AppError::Processing("decoder blew up at /tmp/x.jpg".into());
        assert_eq!(err.http_status_code(), 500);
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "Image upload failed");
        assert!(!err.client_message().contains("/tmp"));
    }

    #[test]
    fn test_storage_error_has_distinct_code() {
        assert_eq!(
            AppError::Storage("disk full".into()).error_code(),
            "STORAGE_ERROR"
        );
        assert_eq!(
            AppError::Processing("bad".into()).error_code(),
            "PROCESSING_ERROR"
        );
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(
            AppError::InvalidFileType("x".into()).log_level(),
            LogLevel::Debug
        );
        assert_eq!(AppError::Storage("x".into()).log_level(), LogLevel::Error);
    }
}
