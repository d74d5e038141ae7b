//! Workbook rendering and artifact storage
//!
//! - workbook: summary workbook and journal-only template as `.xlsx` bytes
//! - journal: the journal import rows both workbooks share
//! - store: where rendered files wait for download
//! - naming: download names derived from the upload

pub mod error;
pub mod journal;
pub mod naming;
pub mod store;
pub mod workbook;

pub use error::{ExportError, ExportResult};
pub use journal::{journal_rows, JournalTemplateRow, JOURNAL_HEADERS, NO_ENTRY_NOTE};
pub use naming::ArtifactNames;
pub use store::{validate_artifact_name, ArtifactStore, LocalArtifactStore};
pub use workbook::{render_full_workbook, render_journal_template, JOURNAL_SHEET, SUMMARY_SHEET};
