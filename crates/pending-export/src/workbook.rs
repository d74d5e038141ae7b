//! Excel rendering of the summary workbook and the journal-only template

use chrono::NaiveDate;
use pending_config::JournalConfig;
use pending_core::{round_amount, ProcessOutcome, TransactionRow};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Formula, Workbook, Worksheet};

use crate::error::ExportResult;
use crate::journal::{journal_rows, JournalTemplateRow, JOURNAL_HEADERS, NO_ENTRY_NOTE};

pub const SUMMARY_SHEET: &str = "Pending Summary";
pub const JOURNAL_SHEET: &str = "JE Output";

/// Headers of the transaction table in the summary sheet
pub const TRANSACTION_HEADERS: [&str; 8] = [
    "Date",
    "ACH_DEBIT_AMOUNT",
    "ACH_RETURN_AMOUNT",
    "Date processed",
    "CN",
    "DN",
    "Net Amount (B-C)",
    "Issues",
];

const AMOUNT_FORMAT: &str = "#,##0.00";
const DATE_FORMAT: &str = "m/d/yyyy";
const HEADER_FILL: u32 = 0xD3D3D3;
const TARGET_FILL: u32 = 0xFFFF00;
const FLAGGED_FILL: u32 = 0xFFC000;
const NET_FILL: u32 = 0xE8E8E8;

/// Cell formats shared by both sheets
struct Styles {
    title: Format,
    bold: Format,
    header: Format,
    plain: Format,
    amount: Format,
    date: Format,
    net_label: Format,
    net_amount: Format,
    note: Format,
}

impl Styles {
    fn new() -> Self {
        let bordered = Format::new().set_border(FormatBorder::Thin);
        Self {
            title: Format::new().set_bold().set_font_size(14),
            bold: Format::new().set_bold(),
            header: bordered
                .clone()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_pattern(FormatPattern::Solid)
                .set_background_color(Color::RGB(HEADER_FILL)),
            plain: bordered.clone(),
            amount: bordered
                .clone()
                .set_num_format(AMOUNT_FORMAT)
                .set_align(FormatAlign::Right),
            date: bordered.clone().set_num_format(DATE_FORMAT),
            net_label: bordered
                .clone()
                .set_bold()
                .set_pattern(FormatPattern::Solid)
                .set_background_color(Color::RGB(NET_FILL)),
            net_amount: bordered
                .set_bold()
                .set_num_format(AMOUNT_FORMAT)
                .set_align(FormatAlign::Right)
                .set_pattern(FormatPattern::Solid)
                .set_background_color(Color::RGB(NET_FILL)),
            note: Format::new().set_italic(),
        }
    }
}

/// Row fill for a transaction line
fn filled(format: &Format, fill: Option<u32>) -> Format {
    match fill {
        Some(rgb) => format
            .clone()
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(rgb)),
        None => format.clone(),
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Render the full workbook: every ingested row, the summary and the entry
pub fn render_full_workbook(
    outcome: &ProcessOutcome,
    all_rows: &[TransactionRow],
    meta: &JournalConfig,
) -> ExportResult<Vec<u8>> {
    let styles = Styles::new();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SUMMARY_SHEET)?;

    sheet.write_string_with_format(0, 0, format!("{} Processing", meta.memo_prefix), &styles.title)?;
    sheet.write_string_with_format(2, 0, format!("File Period: {}", outcome.file_period), &styles.bold)?;
    sheet.write_string_with_format(3, 0, format!("Date Filter: {}", outcome.target_period), &styles.bold)?;

    let mut row: u32 = 5;
    sheet.write_string_with_format(row, 0, "ALL TRANSACTIONS", &styles.bold)?;
    row += 1;
    write_headers(sheet, row, &TRANSACTION_HEADERS, &styles.header)?;

    for txn in all_rows {
        row += 1;
        write_transaction(sheet, row, txn, outcome, &styles)?;
    }

    row += 2;
    row = write_summary(sheet, row, outcome, &styles)?;

    row += 3;
    sheet.write_string_with_format(row, 0, "JOURNAL ENTRY", &styles.bold)?;
    row += 1;
    write_headers(sheet, row, &JOURNAL_HEADERS, &styles.header)?;
    for line in journal_rows(outcome, meta) {
        row += 1;
        write_journal_line(sheet, row, &line, &styles)?;
    }
    if !outcome.result.journal_entry.is_effective() {
        row += 1;
        sheet.write_string_with_format(row, 0, NO_ENTRY_NOTE, &styles.note)?;
    }

    set_widths(sheet, &[14.0, 20.0, 20.0, 14.0, 16.0, 16.0, 45.0, 18.0, 10.0, 28.0, 28.0, 16.0])?;

    log::debug!("Rendered summary workbook with {} transaction rows", all_rows.len());
    Ok(workbook.save_to_buffer()?)
}

/// Render the journal-only workbook in the ERP import layout
pub fn render_journal_template(outcome: &ProcessOutcome, meta: &JournalConfig) -> ExportResult<Vec<u8>> {
    let styles = Styles::new();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(JOURNAL_SHEET)?;

    write_headers(sheet, 0, &JOURNAL_HEADERS, &styles.header)?;
    for (idx, line) in journal_rows(outcome, meta).iter().enumerate() {
        write_journal_line(sheet, idx as u32 + 1, line, &styles)?;
    }
    set_widths(sheet, &[12.0, 12.0, 12.0, 14.0, 30.0, 62.0, 16.0, 16.0, 10.0, 32.0, 30.0, 16.0])?;

    Ok(workbook.save_to_buffer()?)
}

fn write_headers(sheet: &mut Worksheet, row: u32, headers: &[&str], format: &Format) -> ExportResult<()> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(row, col as u16, *header, format)?;
    }
    Ok(())
}

fn set_widths(sheet: &mut Worksheet, widths: &[f64]) -> ExportResult<()> {
    for (col, width) in widths.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }
    Ok(())
}

fn write_transaction(
    sheet: &mut Worksheet,
    row: u32,
    txn: &TransactionRow,
    outcome: &ProcessOutcome,
    styles: &Styles,
) -> ExportResult<()> {
    let in_target = txn.in_period(outcome.target_period);
    let fill = if txn.is_flagged() {
        Some(FLAGGED_FILL)
    } else if in_target {
        Some(TARGET_FILL)
    } else {
        None
    };
    let plain = filled(&styles.plain, fill);
    let amount = filled(&styles.amount, fill);
    let date = filled(&styles.date, fill);

    write_date_cell(sheet, row, 0, txn.date, &txn.raw.date, &date, &plain)?;
    write_amount_cell(sheet, row, 1, txn.ach_debit_amount, &txn.raw.debit, &amount, &plain)?;
    write_amount_cell(sheet, row, 2, txn.ach_return_amount, &txn.raw.return_amount, &amount, &plain)?;
    write_date_cell(sheet, row, 3, txn.date_processed, &txn.raw.date_processed, &date, &plain)?;
    sheet.write_string_with_format(row, 4, txn.credit_note.as_deref().unwrap_or(""), &plain)?;
    sheet.write_string_with_format(row, 5, txn.debit_note.as_deref().unwrap_or(""), &plain)?;

    if in_target {
        // Spreadsheet rows are 1-based
        let n = row + 1;
        let formula = Formula::new(format!("=IFERROR(B{n}-C{n},\"\")"))
            .set_result(format!("{:.2}", round_amount(txn.net())));
        sheet.write_formula_with_format(row, 6, formula, &amount)?;
    } else {
        sheet.write_blank(row, 6, &plain)?;
    }
    sheet.write_string_with_format(row, 7, txn.issue_summary(), &plain)?;
    Ok(())
}

fn write_date_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<NaiveDate>,
    raw: &str,
    date_format: &Format,
    text_format: &Format,
) -> ExportResult<()> {
    match value {
        Some(date) => sheet.write_datetime_with_format(row, col, &date, date_format)?,
        None => sheet.write_string_with_format(row, col, raw, text_format)?,
    };
    Ok(())
}

fn write_amount_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<Decimal>,
    raw: &str,
    amount_format: &Format,
    text_format: &Format,
) -> ExportResult<()> {
    match value {
        Some(v) => sheet.write_number_with_format(row, col, to_f64(v), amount_format)?,
        None => sheet.write_string_with_format(row, col, raw, text_format)?,
    };
    Ok(())
}

/// Write the SUMMARY block starting at `row`; returns the last row used
fn write_summary(sheet: &mut Worksheet, mut row: u32, outcome: &ProcessOutcome, styles: &Styles) -> ExportResult<u32> {
    let result = &outcome.result;
    sheet.write_string_with_format(row, 0, "SUMMARY", &styles.header)?;
    row += 1;
    sheet.write_string_with_format(row, 0, "Description", &styles.header)?;
    sheet.write_string_with_format(row, 1, "Amount", &styles.header)?;

    let text_lines = [
        ("File Period", outcome.file_period.to_string()),
        ("Target Period", outcome.target_period.to_string()),
        ("Rows in Target Period", result.row_count().to_string()),
    ];
    for (label, value) in text_lines {
        row += 1;
        sheet.write_string_with_format(row, 0, label, &styles.plain)?;
        sheet.write_string_with_format(row, 1, value, &styles.plain)?;
    }

    for (label, value) in [
        ("Total ACH Debit Amount", result.total_debit),
        ("Total ACH Return Amount", result.total_return),
    ] {
        row += 1;
        sheet.write_string_with_format(row, 0, label, &styles.plain)?;
        sheet.write_number_with_format(row, 1, to_f64(round_amount(value)), &styles.amount)?;
    }

    row += 1;
    sheet.write_string_with_format(row, 0, "Net Amount (Debit - Return)", &styles.net_label)?;
    sheet.write_number_with_format(row, 1, to_f64(result.net_amount_rounded()), &styles.net_amount)?;
    Ok(row)
}

fn write_journal_line(sheet: &mut Worksheet, row: u32, line: &JournalTemplateRow, styles: &Styles) -> ExportResult<()> {
    for (col, amount) in [(0u16, line.debit), (1u16, line.credit)] {
        match amount {
            Some(v) => sheet.write_number_with_format(row, col, to_f64(v), &styles.amount)?,
            None => sheet.write_blank(row, col, &styles.plain)?,
        };
    }
    for (offset, text) in line.text_cells().iter().enumerate() {
        sheet.write_string_with_format(row, offset as u16 + 2, *text, &styles.plain)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx};
    use pending_core::{process, RowIssue};
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn scenario_rows() -> Vec<TransactionRow> {
        let mut rows = vec![
            TransactionRow::new(date(9, 15), dec!(100), dec!(20)),
            TransactionRow::new(date(9, 30), dec!(0), dec!(0)),
            TransactionRow::new(date(10, 1), dec!(50), dec!(0)),
            TransactionRow::new(date(10, 15), dec!(30), dec!(10)),
        ];
        rows.push(TransactionRow {
            source_row: 5,
            raw: pending_core::RawCells {
                date: "pending".to_string(),
                debit: "12".to_string(),
                ..Default::default()
            },
            ach_debit_amount: Some(dec!(12)),
            issues: vec![RowIssue::UnparseableDate],
            ..Default::default()
        });
        rows
    }

    fn open(bytes: Vec<u8>, sheet: &str) -> calamine::Range<Data> {
        let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        workbook.worksheet_range(sheet).unwrap()
    }

    fn find_row(range: &calamine::Range<Data>, label: &str) -> Option<usize> {
        range
            .rows()
            .position(|r| matches!(r.first(), Some(Data::String(s)) if s == label))
    }

    #[test]
    fn test_dates_are_native_cells() {
        let rows = scenario_rows();
        let outcome = process(&rows).unwrap();
        let bytes = render_full_workbook(&outcome, &rows, &JournalConfig::default()).unwrap();
        let range = open(bytes, SUMMARY_SHEET);

        // first transaction row: 2025-09-15
        match range.get_value((7, 0)) {
            Some(Data::DateTime(dt)) => assert_eq!(dt.as_f64(), 45915.0),
            other => panic!("expected a date cell, got {:?}", other),
        }
    }

    #[test]
    fn test_full_workbook_layout() {
        let rows = scenario_rows();
        let outcome = process(&rows).unwrap();
        let bytes = render_full_workbook(&outcome, &rows, &JournalConfig::default()).unwrap();
        let range = open(bytes, SUMMARY_SHEET);

        assert_eq!(
            range.get_value((2, 0)),
            Some(&Data::String("File Period: September 2025".to_string()))
        );
        assert_eq!(
            range.get_value((3, 0)),
            Some(&Data::String("Date Filter: October 2025".to_string()))
        );
        assert_eq!(range.get_value((6, 6)), Some(&Data::String("Net Amount (B-C)".to_string())));
        // malformed row keeps its raw text and issue note
        assert_eq!(range.get_value((11, 0)), Some(&Data::String("pending".to_string())));
        assert_eq!(range.get_value((11, 7)), Some(&Data::String("unreadable Date".to_string())));

        let net_row = find_row(&range, "Net Amount (Debit - Return)").unwrap();
        assert_eq!(range.get_value((net_row as u32, 1)), Some(&Data::Float(70.0)));

        let je_row = find_row(&range, "JOURNAL ENTRY").unwrap();
        assert_eq!(range.get_value((je_row as u32 + 2, 0)), Some(&Data::Float(70.0)));
        assert_eq!(range.get_value((je_row as u32 + 3, 1)), Some(&Data::Float(70.0)));
        assert!(find_row(&range, NO_ENTRY_NOTE).is_none());
    }

    #[test]
    fn test_target_rows_carry_formula() {
        let rows = scenario_rows();
        let outcome = process(&rows).unwrap();
        let bytes = render_full_workbook(&outcome, &rows, &JournalConfig::default()).unwrap();

        let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        let formulas = workbook.worksheet_formula(SUMMARY_SHEET).unwrap();
        let (start_row, _) = formulas.start().unwrap();
        assert!(start_row <= 9);
        let texts: Vec<String> = formulas
            .used_cells()
            .map(|(_, _, f)| f.clone())
            .filter(|f| !f.is_empty())
            .collect();
        assert_eq!(texts.len(), 2);
        assert!(texts.iter().all(|f| f.contains("IFERROR(")));
        assert!(texts[0].contains("B10-C10"));
    }

    #[test]
    fn test_zero_net_writes_note() {
        let rows = vec![
            TransactionRow::new(date(9, 1), dec!(10), dec!(0)),
            TransactionRow::new(date(10, 2), dec!(25), dec!(25)),
        ];
        let outcome = process(&rows).unwrap();
        let bytes = render_full_workbook(&outcome, &rows, &JournalConfig::default()).unwrap();
        let range = open(bytes, SUMMARY_SHEET);

        let note_row = find_row(&range, NO_ENTRY_NOTE).unwrap();
        let je_row = find_row(&range, "JOURNAL ENTRY").unwrap();
        assert_eq!(note_row, je_row + 4);
        assert_eq!(range.get_value((je_row as u32 + 2, 0)), Some(&Data::Float(0.0)));
    }

    #[test]
    fn test_journal_template_sheet() {
        let rows = vec![
            TransactionRow::new(date(9, 1), dec!(5), dec!(0)),
            TransactionRow::new(date(10, 3), dec!(10), dec!(40)),
        ];
        let outcome = process(&rows).unwrap();
        let bytes = render_journal_template(&outcome, &JournalConfig::default()).unwrap();
        let range = open(bytes, JOURNAL_SHEET);

        assert_eq!(range.height(), 3);
        assert_eq!(range.get_value((0, 10)), Some(&Data::String("Journal Entry : Memo".to_string())));
        assert_eq!(range.get_value((1, 1)), Some(&Data::Float(30.0)));
        assert_eq!(range.get_value((1, 2)), Some(&Data::String("9/30/2025".to_string())));
        assert_eq!(range.get_value((2, 0)), Some(&Data::Float(30.0)));
        assert_eq!(
            range.get_value((2, 5)),
            Some(&Data::String(
                "21017 - Other Current Liabilities : Accrued Liabilities - Platform".to_string()
            ))
        );
    }
}
