//! Core processing for pending-debit uploads
//!
//! Two pure steps run on every upload:
//! - period: detect the file month and the month after it
//! - aggregate: total the following month's rows and derive the journal entry
//!
//! Nothing in this crate performs I/O or keeps state between calls.

pub mod aggregate;
pub mod error;
pub mod models;
pub mod period;
pub mod reports;
pub mod types;

pub use aggregate::{aggregate, derive_journal_entry, process, round_amount, AggregationResult, ProcessOutcome};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorDetails, ErrorLogger, ErrorSeverity};
pub use models::{JournalEntry, JournalLine, RawCells, TransactionRow};
pub use period::{resolve_periods, Period};
pub use reports::{JournalLineView, ProcessSummary};
pub use types::{AccountCode, RowIssue, Side};
