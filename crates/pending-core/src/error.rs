//! Error types for pending-core
//!
//! Error codes, severities and detail builders shared by every layer,
//! plus the logging hook the server uses to report failed uploads.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No row carries a usable date
    EmptyInput,
    /// Month outside 1-12
    InvalidPeriod,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::EmptyInput => write!(f, "EMPTY_INPUT"),
            ErrorCode::InvalidPeriod => write!(f, "INVALID_PERIOD"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code, as text so other crates can reuse the structure
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: impl ToString, message: String) -> Self {
        Self {
            code: code.to_string(),
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Caused by the uploaded file; the user can fix it
    Warning,
    /// Operation failed on our side
    Error,
    /// Application may be unstable
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for pending-core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("No transaction has a readable Date; cannot determine the file period")]
    EmptyInput,

    #[error("Invalid period: {year}-{month}")]
    InvalidPeriod { year: i32, month: u32 },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::EmptyInput => ErrorCode::EmptyInput,
            CoreError::InvalidPeriod { .. } => ErrorCode::InvalidPeriod,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::EmptyInput => ErrorSeverity::Warning,
            CoreError::InvalidPeriod { .. } => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::EmptyInput => {
                details = details.with_suggestion(
                    "Check that the 'Date' column holds dates (e.g. 10/01/2025 or 2025-10-01).".to_string(),
                );
                details = details.with_suggestion(
                    "Make sure the export is not empty below the header row.".to_string(),
                );
            }
            CoreError::InvalidPeriod { year, month } => {
                details = details.with_detail(serde_json::json!({ "year": year, "month": month }));
            }
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Upload id for tracing
    pub request_id: Option<String>,
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            request_id: None,
            operation: operation.into(),
            data: serde_json::json!({}),
        }
    }

    /// Add request ID
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    /// Log an error with its code
    fn log_error(&self, code: &str, error: &dyn std::error::Error, context: &ErrorContext);
    /// Log a warning
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, code: &str, error: &dyn std::error::Error, context: &ErrorContext) {
        log::error!(
            target: "pending_debits::error",
            "ERROR [{}] {} - Operation: {} - Request: {:?} - Data: {}",
            code,
            error,
            context.operation,
            context.request_id,
            context.data
        );
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "pending_debits::error",
            "WARNING: {} - Operation: {} - Request: {:?}",
            message,
            context.operation,
            context.request_id
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::EmptyInput.to_string(), "EMPTY_INPUT");
        assert_eq!(ErrorCode::InvalidPeriod.to_string(), "INVALID_PERIOD");
    }

    #[test]
    fn test_core_error_code_and_severity() {
        let error = CoreError::EmptyInput;
        assert_eq!(error.code(), ErrorCode::EmptyInput);
        assert_eq!(error.severity(), ErrorSeverity::Warning);

        let error = CoreError::InvalidPeriod { year: 2025, month: 13 };
        assert_eq!(error.code(), ErrorCode::InvalidPeriod);
        assert_eq!(error.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_error_details_empty_input() {
        let details = CoreError::EmptyInput.to_details();
        assert_eq!(details.code, "EMPTY_INPUT");
        assert_eq!(details.suggestions.len(), 2);
        assert!(details.to_string().contains("Suggestions"));
    }

    #[test]
    fn test_error_details_invalid_period() {
        let details = CoreError::InvalidPeriod { year: 2025, month: 0 }.to_details();
        assert!(details.details.is_some());
        assert!(details.message.contains("2025-0"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("upload")
            .with_request_id("20251019_101500_123")
            .with_data("filename", serde_json::json!("export.xlsx"));

        assert_eq!(context.operation, "upload");
        assert_eq!(context.request_id.as_deref(), Some("20251019_101500_123"));
        assert_eq!(context.data["filename"], "export.xlsx");
    }
}
