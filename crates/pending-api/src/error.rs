//! Error types for pending-api

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use pending_core::{CoreError, ErrorDetails, ErrorSeverity};
use pending_export::ExportError;
use pending_ingest::IngestError;
use thiserror::Error;

use crate::routes::upload::page::upload_form_html;

const INTERNAL_MESSAGE: &str = "Error processing file: an internal error occurred, please try again";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("{message}")]
    BadRequest { code: &'static str, message: String },

    #[error("Error processing file: {0}")]
    Processing(CoreError),

    #[error("File too large (limit {limit} bytes)")]
    PayloadTooLarge { limit: usize },

    #[error("Internal server error: {message}")]
    InternalError { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code: "BAD_REQUEST",
            message: message.into(),
        }
    }

    /// Whether the user can fix this by uploading a different file
    fn is_user_error(&self) -> bool {
        match self {
            ApiError::Processing(error) => error.severity() == ErrorSeverity::Warning,
            ApiError::InternalError { .. } => false,
            _ => true,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Processing(_) if self.is_user_error() => StatusCode::BAD_REQUEST,
            ApiError::Processing(_) | ApiError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown in the upload page's flash area
    pub fn user_message(&self) -> String {
        match self {
            ApiError::PayloadTooLarge { limit } => {
                format!("File too large. The maximum upload size is {} MB", limit / (1024 * 1024))
            }
            other if !other.is_user_error() => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Structured body for JSON clients
    pub fn to_details(&self) -> ErrorDetails {
        let message = self.user_message();
        match self {
            ApiError::Processing(error) => {
                let mut details = error.to_details();
                details.message = message;
                details
            }
            ApiError::NotFound { .. } => ErrorDetails::new("NOT_FOUND", message),
            ApiError::BadRequest { code, .. } => ErrorDetails::new(*code, message),
            ApiError::PayloadTooLarge { .. } => ErrorDetails::new("PAYLOAD_TOO_LARGE", message),
            ApiError::InternalError { .. } => ErrorDetails::new("INTERNAL_ERROR", message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::NotFound { resource } => {
                (status, format!("Not found: {}", resource)).into_response()
            }
            other => (status, Html(upload_form_html(Some(&other.user_message())))).into_response(),
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(error: IngestError) -> Self {
        ApiError::BadRequest {
            code: error.code(),
            message: format!("Error processing file: {}", error),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        ApiError::Processing(error)
    }
}

impl From<ExportError> for ApiError {
    fn from(error: ExportError) -> Self {
        let code = error.code();
        match error {
            ExportError::NotFound { name } => ApiError::NotFound { resource: name },
            ExportError::InvalidName { name } => ApiError::BadRequest {
                code,
                message: format!("Invalid file name: {}", name),
            },
            other => ApiError::InternalError {
                message: other.to_string(),
            },
        }
    }
}
