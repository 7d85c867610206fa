//! Error types module
//!
//! This module provides the error types used throughout Kathalu. Caller-facing failures
//! are unified under the `AppError` enum. Transport failures have their own type
//! (`TransportError`) because the upload pipeline reports them per file instead of
//! propagating them; they only become an `AppError` in front-end glue.

use std::io;

use crate::transport::TransportError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like a rejected request
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the person running a front end.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether repeating the same action may succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message (may differ from the internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(#[source] TransportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// True for failures detected before any network call (ValidationFailure).
    pub fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            AppError::InvalidInput(_)
                | AppError::Validation(_)
                | AppError::PayloadTooLarge(_)
                | AppError::UnsupportedFileType(_)
        )
    }

    /// Get the error type name for detailed error output
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Validation(_) => "Validation",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::UnsupportedFileType(_) => "UnsupportedFileType",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::NotFound(_) => "NotFound",
            AppError::Transport(_) => "Transport",
            AppError::Config(_) => "Config",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Emit the error through tracing at its configured level.
    pub fn log(&self) {
        let error_type = self.error_type();
        match self.log_level() {
            LogLevel::Debug => {
                tracing::debug!(error = %self, error_type = error_type, "Error occurred");
            }
            LogLevel::Warn => {
                tracing::warn!(error = %self, error_type = error_type, "Error occurred");
            }
            LogLevel::Error => {
                tracing::error!(error = %self, error_type = error_type, "Error occurred");
            }
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl From<TransportError> for AppError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status {
                status: 401 | 403,
                body,
            } => AppError::Unauthorized(body),
            TransportError::Status { status: 404, body } => AppError::NotFound(body),
            other => AppError::Transport(other),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("UUID parsing error: {}", err))
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        AppError::InvalidInput(_) => (
            "INVALID_INPUT",
            false,
            Some("Check the story fields and try again"),
            LogLevel::Debug,
        ),
        AppError::Validation(_) => (
            "VALIDATION_ERROR",
            false,
            Some("Fill in all required fields; descriptions need at least 32 characters"),
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce the file size and try again"),
            LogLevel::Debug,
        ),
        AppError::UnsupportedFileType(_) => (
            "UNSUPPORTED_FILE_TYPE",
            false,
            Some("Use an image, video, audio or PDF file"),
            LogLevel::Debug,
        ),
        AppError::Unauthorized(_) => (
            "UNAUTHORIZED",
            false,
            Some("Log in again and retry"),
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            "NOT_FOUND",
            false,
            Some("Verify the identifier exists"),
            LogLevel::Debug,
        ),
        AppError::Transport(_) => (
            "TRANSPORT_ERROR",
            true,
            Some("Check the network connection and retry"),
            LogLevel::Warn,
        ),
        AppError::Config(_) => (
            "CONFIG_ERROR",
            false,
            Some("Check environment variables and .env file"),
            LogLevel::Error,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::Validation(ref errors) => format!("Validation failed: {}", errors),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::UnsupportedFileType(ref msg) => msg.clone(),
            AppError::Unauthorized(_) => "Authentication required".to_string(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::Transport(_) => "Failed to reach the corpus service".to_string(),
            AppError::Config(ref msg) => msg.clone(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal error".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_validation() {
        let err = AppError::InvalidInput("Title is required".to_string());
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "Title is required");
        assert_eq!(err.log_level(), LogLevel::Debug);
        assert!(err.is_validation_failure());
    }

    #[test]
    fn test_error_metadata_transport() {
        let err = AppError::from(TransportError::Request("connection reset".to_string()));
        assert_eq!(err.error_code(), "TRANSPORT_ERROR");
        assert!(err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Warn);
        assert!(!err.is_validation_failure());
        assert!(err.detailed_message().contains("connection reset"));
    }

    #[test]
    fn test_status_errors_map_to_domain_variants() {
        let unauthorized = AppError::from(TransportError::Status {
            status: 401,
            body: "token expired".to_string(),
        });
        assert!(matches!(unauthorized, AppError::Unauthorized(_)));

        let missing = AppError::from(TransportError::Status {
            status: 404,
            body: "no such user".to_string(),
        });
        assert!(matches!(missing, AppError::NotFound(_)));

        let server = AppError::from(TransportError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        });
        assert!(matches!(server, AppError::Transport(_)));
    }

    #[test]
    fn test_error_metadata_suggested_actions() {
        let err = AppError::PayloadTooLarge("too big".to_string());
        assert_eq!(
            err.suggested_action(),
            Some("Reduce the file size and try again")
        );

        let err = AppError::Config("API_BASE_URL".to_string());
        assert_eq!(err.error_type(), "Config");
        assert_eq!(err.log_level(), LogLevel::Error);
    }
}
