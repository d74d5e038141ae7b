//! Cell value parsing
//!
//! Exports arrive either as native Excel values or as text typed by hand,
//! so every reader here accepts both.

use std::str::FromStr;

use calamine::{Data, ExcelDateTime, ExcelDateTimeType};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Text formats tried in order for date cells
const DATE_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Largest serial Excel can display (9999-12-31)
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Outcome of reading a single cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue<T> {
    Empty,
    Value(T),
    /// Present but not readable as `T`
    Invalid,
}

impl<T> CellValue<T> {
    pub fn value(self) -> Option<T> {
        match self {
            CellValue::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, CellValue::Invalid)
    }
}

/// Date of a native Excel date cell, honouring the workbook's date system
pub fn excel_datetime_to_date(value: &ExcelDateTime) -> Option<NaiveDate> {
    let serial = value.as_f64();
    if !serial.is_finite() || serial < 0.0 || serial > MAX_EXCEL_SERIAL {
        return None;
    }
    value.as_datetime().map(|dt| dt.date())
}

/// Convert a bare serial day number (1900 date system) to a date
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    excel_datetime_to_date(&ExcelDateTime::new(serial, ExcelDateTimeType::DateTime, false))
}

/// Parse a hand-typed date
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parse a hand-typed amount; thousands commas are ignored
pub fn parse_amount_text(text: &str) -> CellValue<Decimal> {
    let text = text.trim();
    if text.is_empty() || text == "-" {
        return CellValue::Empty;
    }
    let cleaned = text.replace(',', "");
    match Decimal::from_str(&cleaned).or_else(|_| Decimal::from_scientific(&cleaned)) {
        Ok(value) => CellValue::Value(value),
        Err(_) => CellValue::Invalid,
    }
}

fn float_to_decimal(value: f64) -> CellValue<Decimal> {
    if !value.is_finite() {
        return CellValue::Invalid;
    }
    // Shortest round-trip text keeps 0.1 as 0.1 rather than its binary expansion
    parse_amount_text(&value.to_string())
}

/// Read a date column cell
pub fn parse_date(cell: &Data) -> CellValue<NaiveDate> {
    let parsed = match cell {
        Data::Empty => return CellValue::Empty,
        Data::String(s) if s.trim().is_empty() => return CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) => parse_date_text(s),
        Data::DateTime(dt) => excel_datetime_to_date(dt),
        Data::Float(f) => excel_serial_to_date(*f),
        Data::Int(i) => excel_serial_to_date(*i as f64),
        Data::Bool(_) | Data::DurationIso(_) | Data::Error(_) => None,
    };
    parsed.map_or(CellValue::Invalid, CellValue::Value)
}

/// Read an amount column cell
pub fn parse_amount(cell: &Data) -> CellValue<Decimal> {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Float(f) => float_to_decimal(*f),
        Data::Int(i) => CellValue::Value(Decimal::from(*i)),
        Data::String(s) => parse_amount_text(s),
        _ => CellValue::Invalid,
    }
}

/// Cell contents as display text
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match excel_datetime_to_date(dt) {
            Some(date) => date.format("%m/%d/%Y").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::Error(e) => e.to_string(),
    }
}

/// Optional free-text cell, `None` when blank
pub fn note_text(cell: &Data) -> Option<String> {
    let text = cell_text(cell);
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
