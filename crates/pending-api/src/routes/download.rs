//! Workbook downloads

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use pending_export::ArtifactNames;
use pending_ingest::XLSX_MIME;

use crate::{ApiError, AppState};

fn attachment(name: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", name)),
        ],
        bytes,
    )
        .into_response()
}

/// Serve the summary workbook
pub async fn download_full(State(state): State<AppState>, Path(filename): Path<String>) -> Result<Response, ApiError> {
    let bytes = state.store.load(&filename).await?;
    log::info!("Serving {}", filename);
    Ok(attachment(&filename, bytes))
}

/// Serve the journal-only workbook paired with a summary workbook name
pub async fn download_journal(State(state): State<AppState>, Path(filename): Path<String>) -> Result<Response, ApiError> {
    let journal_name = ArtifactNames::journal_for(&filename).ok_or_else(|| ApiError::NotFound {
        resource: filename.clone(),
    })?;
    let bytes = state.store.load(&journal_name).await?;
    log::info!("Serving {}", journal_name);
    Ok(attachment(&journal_name, bytes))
}
