//! Error types for pending-ingest

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Could not read workbook: {message}")]
    Workbook { message: String },

    #[error("Workbook has no worksheet")]
    NoWorksheet,

    #[error("No header row found in the first {scanned} rows")]
    HeaderNotFound { scanned: usize },

    #[error("Could not find '{column}' column")]
    MissingColumn { column: String },
}

impl IngestError {
    /// Stable code for logs and API responses
    pub fn code(&self) -> &'static str {
        match self {
            IngestError::Workbook { .. } => "WORKBOOK_UNREADABLE",
            IngestError::NoWorksheet => "NO_WORKSHEET",
            IngestError::HeaderNotFound { .. } => "HEADER_NOT_FOUND",
            IngestError::MissingColumn { .. } => "MISSING_COLUMN",
        }
    }
}

impl From<calamine::Error> for IngestError {
    fn from(error: calamine::Error) -> Self {
        IngestError::Workbook {
            message: error.to_string(),
        }
    }
}

pub type IngestResult<T> = Result<T, IngestError>;
