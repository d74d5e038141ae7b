//! Spreadsheet ingestion for processor transaction exports
//!
//! Reads the first worksheet of an uploaded workbook, locates the header
//! row, validates the required columns and turns every non-blank line into a
//! [`TransactionRow`](pending_core::TransactionRow). Unreadable cells are
//! flagged on the row rather than dropping it.

pub mod cells;
pub mod error;
pub mod filename;
pub mod reader;
pub mod schema;

pub use error::{IngestError, IngestResult};
pub use filename::{period_from_filename, period_hint_warning};
pub use reader::{read_workbook, IngestedSheet};
pub use schema::ColumnMap;

/// Shown when an upload is not an Excel workbook
pub const INVALID_FILE_TYPE_MESSAGE: &str = "Invalid file type. Please upload an Excel file (.xlsx or .xls)";

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const XLS_MIME: &str = "application/vnd.ms-excel";

/// Check whether an upload looks like an Excel workbook.
///
/// The extension decides when there is one; otherwise the declared content
/// type must be one of the Excel types.
pub fn is_accepted_spreadsheet(name: &str, declared_type: Option<&str>) -> bool {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xls")
        }
        _ => declared_type
            .map(|t| t.split(';').next().unwrap_or(t).trim())
            .map_or(false, |t| t.eq_ignore_ascii_case(XLSX_MIME) || t.eq_ignore_ascii_case(XLS_MIME)),
    }
}
