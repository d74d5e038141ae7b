//! Workbook reader: first worksheet to transaction rows

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use pending_core::{RawCells, RowIssue, TransactionRow};

use crate::cells::{cell_text, note_text, parse_amount, parse_date};
use crate::error::{IngestError, IngestResult};
use crate::schema::{find_header_row, ColumnMap};

static EMPTY: Data = Data::Empty;

/// Rows read from one worksheet
#[derive(Debug, Clone)]
pub struct IngestedSheet {
    pub sheet_name: String,
    /// 1-based row holding the headers
    pub header_row: u32,
    pub columns: ColumnMap,
    pub rows: Vec<TransactionRow>,
}

impl IngestedSheet {
    /// Rows that carry at least one cell issue
    pub fn flagged_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_flagged()).count()
    }
}

/// Read the first worksheet of an `.xlsx`/`.xls` workbook held in memory
pub fn read_workbook(bytes: &[u8]) -> IngestResult<IngestedSheet> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(IngestError::NoWorksheet)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoWorksheet)??;

    let (start_row, _) = range.start().unwrap_or((0, 0));
    let (header_offset, headers) = find_header_row(range.rows())?;
    let columns = ColumnMap::from_headers(&headers)?;

    let mut rows = Vec::new();
    for (idx, cells) in range.rows().enumerate().skip(header_offset + 1) {
        let cell = |i: usize| cells.get(i).unwrap_or(&EMPTY);
        if columns.indices().all(|i| cell_text(cell(i)).trim().is_empty()) {
            continue;
        }
        let source_row = start_row + idx as u32 + 1;
        rows.push(build_row(source_row, &columns, cell));
    }

    let sheet = IngestedSheet {
        sheet_name,
        header_row: start_row + header_offset as u32 + 1,
        columns,
        rows,
    };
    log::info!(
        "Read {} rows from sheet '{}' (header at row {}, {} flagged)",
        sheet.rows.len(),
        sheet.sheet_name,
        sheet.header_row,
        sheet.flagged_count()
    );
    Ok(sheet)
}

fn build_row<'a>(source_row: u32, columns: &ColumnMap, cell: impl Fn(usize) -> &'a Data) -> TransactionRow {
    let mut issues = Vec::new();
    let mut check = |invalid: bool, issue: RowIssue| {
        if invalid {
            issues.push(issue);
        }
    };

    let date = parse_date(cell(columns.date));
    check(date.is_invalid(), RowIssue::UnparseableDate);
    let debit = parse_amount(cell(columns.debit));
    check(debit.is_invalid(), RowIssue::NonNumericDebit);
    let return_amount = parse_amount(cell(columns.return_amount));
    check(return_amount.is_invalid(), RowIssue::NonNumericReturn);
    let date_processed = parse_date(cell(columns.date_processed));
    check(date_processed.is_invalid(), RowIssue::UnparseableDateProcessed);

    if !issues.is_empty() {
        log::warn!("Row {} has unreadable cells: {:?}", source_row, issues);
    }

    TransactionRow {
        source_row,
        date: date.value(),
        ach_debit_amount: debit.value(),
        ach_return_amount: return_amount.value(),
        date_processed: date_processed.value(),
        credit_note: columns.credit_note.and_then(|i| note_text(cell(i))),
        debit_note: columns.debit_note.and_then(|i| note_text(cell(i))),
        raw: RawCells {
            date: cell_text(cell(columns.date)),
            date_processed: cell_text(cell(columns.date_processed)),
            debit: cell_text(cell(columns.debit)),
            return_amount: cell_text(cell(columns.return_amount)),
        },
        issues,
    }
}
