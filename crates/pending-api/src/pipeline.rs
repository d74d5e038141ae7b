//! Upload processing shared by the form and the JSON endpoint

use bytes::Bytes;
use pending_core::{process, ErrorContext, ProcessOutcome, ProcessSummary};
use pending_export::{render_full_workbook, render_journal_template, ArtifactNames};
use pending_ingest::{is_accepted_spreadsheet, period_hint_warning, read_workbook, IngestedSheet, INVALID_FILE_TYPE_MESSAGE};

use crate::{ApiError, AppState};

/// A file received from the upload form
#[derive(Debug, Clone)]
pub struct Upload {
    /// Upload id, also used as the artifact prefix and log request id
    pub id: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Everything computed from one upload before anything is written
#[derive(Debug, Clone)]
pub struct Analysis {
    pub sheet: IngestedSheet,
    pub outcome: ProcessOutcome,
    pub warnings: Vec<String>,
}

impl Analysis {
    pub fn summary(&self) -> ProcessSummary {
        ProcessSummary::new(&self.outcome, &self.sheet.rows, self.warnings.clone())
    }
}

fn context(upload: &Upload, operation: &str) -> ErrorContext {
    ErrorContext::new(operation)
        .with_request_id(upload.id.clone())
        .with_data("filename", serde_json::json!(upload.filename))
}

/// Validate, read and process an upload held in memory
pub fn analyze(state: &AppState, upload: &Upload) -> Result<Analysis, ApiError> {
    if !is_accepted_spreadsheet(&upload.filename, upload.content_type.as_deref()) {
        state
            .error_logger
            .log_warning("Rejected upload with unsupported type", &context(upload, "validate_upload"));
        return Err(ApiError::bad_request(INVALID_FILE_TYPE_MESSAGE));
    }

    let sheet = read_workbook(&upload.bytes).map_err(|e| {
        state.error_logger.log_error(e.code(), &e, &context(upload, "read_workbook"));
        ApiError::from(e)
    })?;

    let outcome = process(&sheet.rows).map_err(|e| {
        state
            .error_logger
            .log_error(&e.code().to_string(), &e, &context(upload, "process_rows"));
        ApiError::from(e)
    })?;

    let mut warnings = Vec::new();
    if let Some(message) = period_hint_warning(&upload.filename, outcome.file_period) {
        state.error_logger.log_warning(&message, &context(upload, "period_hint"));
        warnings.push(message);
    }
    let flagged = sheet.flagged_count();
    if flagged > 0 {
        warnings.push(format!(
            "{} row(s) have unreadable cells; they are highlighted in the summary workbook",
            flagged
        ));
    }

    log::info!(
        "[{}] {}: file period {}, target {}, {} of {} rows, net {}",
        upload.id,
        upload.filename,
        outcome.file_period,
        outcome.target_period,
        outcome.result.row_count(),
        sheet.rows.len(),
        outcome.result.net_amount_rounded()
    );

    Ok(Analysis {
        sheet,
        outcome,
        warnings,
    })
}

/// Render both workbooks and store them for download
pub async fn publish(state: &AppState, upload: &Upload, analysis: &Analysis) -> Result<ArtifactNames, ApiError> {
    let names = ArtifactNames::new(&upload.id, &upload.filename);
    let journal = &state.config.journal;

    let rendered = render_full_workbook(&analysis.outcome, &analysis.sheet.rows, journal)
        .and_then(|full| Ok((full, render_journal_template(&analysis.outcome, journal)?)));
    let (full, journal_only) = rendered.map_err(|e| {
        state.error_logger.log_error(e.code(), &e, &context(upload, "render_workbooks"));
        ApiError::from(e)
    })?;

    let mut written: Vec<&str> = Vec::new();
    for (name, bytes) in [(&names.full, full), (&names.journal, journal_only)] {
        if let Err(e) = state.store.save(name, &bytes).await {
            state.error_logger.log_error(e.code(), &e, &context(upload, "store_artifact"));
            discard(state, upload, &written).await;
            return Err(e.into());
        }
        written.push(name);
    }

    Ok(names)
}

/// Remove artifacts from a pair that could not be stored completely
async fn discard(state: &AppState, upload: &Upload, names: &[&str]) {
    for name in names {
        match state.store.remove(name).await {
            Ok(()) => log::info!("[{}] Removed partial artifact {}", upload.id, name),
            Err(e) => state
                .error_logger
                .log_error(e.code(), &e, &context(upload, "remove_partial_artifact")),
        }
    }
}
