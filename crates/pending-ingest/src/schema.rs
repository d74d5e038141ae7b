//! Header detection and column mapping

use calamine::Data;

use crate::cells::cell_text;
use crate::error::{IngestError, IngestResult};

/// Header of the transaction date column
pub const DATE_HEADER: &str = "Date";
pub const DEBIT_HEADER: &str = "ACH_DEBIT_AMOUNT";
pub const RETURN_HEADER: &str = "ACH_RETURN_AMOUNT";
pub const DATE_PROCESSED_HEADER: &str = "Date processed";
pub const CREDIT_NOTE_HEADER: &str = "CN";
pub const DEBIT_NOTE_HEADER: &str = "DN";

/// Rows searched for the header before giving up
pub const HEADER_SCAN_ROWS: usize = 5;

/// Recognised column kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Date,
    Debit,
    Return,
    DateProcessed,
    CreditNote,
    DebitNote,
}

impl Column {
    fn classify(header: &str) -> Option<Self> {
        let h = header.trim();
        let lower = h.to_ascii_lowercase();
        if lower == "date" {
            Some(Column::Date)
        } else if lower.contains("date") && lower.contains("processed") {
            Some(Column::DateProcessed)
        } else if lower.contains("ach_debit_amount") {
            Some(Column::Debit)
        } else if lower.contains("ach_return_amount") {
            Some(Column::Return)
        } else if h == CREDIT_NOTE_HEADER {
            Some(Column::CreditNote)
        } else if h == DEBIT_NOTE_HEADER {
            Some(Column::DebitNote)
        } else {
            None
        }
    }

    fn is_required(self) -> bool {
        !matches!(self, Column::CreditNote | Column::DebitNote)
    }
}

/// Zero-based column indices of a validated header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub debit: usize,
    pub return_amount: usize,
    pub date_processed: usize,
    pub credit_note: Option<usize>,
    pub debit_note: Option<usize>,
}

impl ColumnMap {
    /// Map header names to indices; the first match of each column wins.
    ///
    /// Fails with `MissingColumn` naming the first required header absent.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> IngestResult<Self> {
        let mut found: [Option<usize>; 6] = [None; 6];
        for (idx, header) in headers.iter().enumerate() {
            if let Some(column) = Column::classify(header.as_ref()) {
                let slot = &mut found[column as usize];
                if slot.is_none() {
                    *slot = Some(idx);
                }
            }
        }

        let require = |column: Column, name: &str| {
            found[column as usize].ok_or_else(|| IngestError::MissingColumn {
                column: name.to_string(),
            })
        };

        Ok(Self {
            date: require(Column::Date, DATE_HEADER)?,
            debit: require(Column::Debit, DEBIT_HEADER)?,
            return_amount: require(Column::Return, RETURN_HEADER)?,
            date_processed: require(Column::DateProcessed, DATE_PROCESSED_HEADER)?,
            credit_note: found[Column::CreditNote as usize],
            debit_note: found[Column::DebitNote as usize],
        })
    }

    /// Every index this map reads
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        [self.date, self.debit, self.return_amount, self.date_processed]
            .into_iter()
            .chain(self.credit_note)
            .chain(self.debit_note)
    }
}

/// Pick the header row among the first rows of a sheet.
///
/// Returns the row offset and its header texts. The row with the most
/// required headers wins; earlier rows win ties.
pub fn find_header_row<'a, I>(rows: I) -> IngestResult<(usize, Vec<String>)>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut best: Option<(usize, usize, Vec<String>)> = None;
    for (offset, row) in rows.into_iter().take(HEADER_SCAN_ROWS).enumerate() {
        let texts: Vec<String> = row.iter().map(|c| cell_text(c).trim().to_string()).collect();
        let hits = texts
            .iter()
            .filter_map(|t| Column::classify(t))
            .filter(|c| c.is_required())
            .count();
        if hits > 0 && best.as_ref().map_or(true, |(_, b, _)| hits > *b) {
            best = Some((offset, hits, texts));
        }
    }

    best.map(|(offset, _, texts)| (offset, texts))
        .ok_or(IngestError::HeaderNotFound { scanned: HEADER_SCAN_ROWS })
}
