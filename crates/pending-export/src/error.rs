//! Error types for pending-export

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Workbook error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid artifact name: {name}")]
    InvalidName { name: String },

    #[error("Artifact not found: {name}")]
    NotFound { name: String },
}

impl ExportError {
    pub fn code(&self) -> &'static str {
        match self {
            ExportError::Xlsx(_) => "WORKBOOK_RENDER_FAILED",
            ExportError::Io(_) => "IO_ERROR",
            ExportError::InvalidName { .. } => "INVALID_ARTIFACT_NAME",
            ExportError::NotFound { .. } => "ARTIFACT_NOT_FOUND",
        }
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
