//! Upload routes - form, result page and JSON processing

pub mod api;
pub mod page;

pub use api::api_process;
pub use page::{index_page, upload};

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use pending_utils::generate_upload_id;

use crate::pipeline::Upload;
use crate::{ApiError, AppState};

/// Multipart field carrying the workbook
pub const FILE_FIELD: &str = "file";

fn multipart_error(state: &AppState, error: MultipartError) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge {
            limit: state.config.storage.max_upload_bytes,
        }
    } else {
        ApiError::bad_request(format!("Could not read upload: {}", error.body_text()))
    }
}

/// Pull the `file` field out of a multipart form, keeping it in memory
pub async fn read_upload(state: &AppState, mut multipart: Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(state, e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| multipart_error(state, e))?;
        if filename.is_empty() {
            break;
        }

        let upload = Upload {
            id: generate_upload_id(),
            filename,
            content_type,
            bytes,
        };
        log::info!(
            "[{}] Received upload {} ({} bytes)",
            upload.id,
            upload.filename,
            upload.bytes.len()
        );
        return Ok(upload);
    }
    Err(ApiError::bad_request("No file selected"))
}
