//! Processing API endpoint - JSON API

use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use pending_core::ProcessSummary;

use super::read_upload;
use crate::pipeline::analyze;
use crate::{ApiError, AppState};

/// `ApiError` rendered as a JSON error body instead of the upload form
#[derive(Debug)]
pub struct JsonError(pub ApiError);

impl From<ApiError> for JsonError {
    fn from(error: ApiError) -> Self {
        JsonError(error)
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        (self.0.status(), Json(self.0.to_details())).into_response()
    }
}

/// Process an upload and return the summary without storing workbooks
pub async fn api_process(State(state): State<AppState>, multipart: Multipart) -> Result<Json<ProcessSummary>, JsonError> {
    let upload = read_upload(&state, multipart).await?;
    let analysis = analyze(&state, &upload)?;
    Ok(Json(analysis.summary()))
}
