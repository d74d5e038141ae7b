//! Period hints from upload file names ("09 Control Septiembre 2025.xlsx")

use once_cell::sync::Lazy;
use pending_core::Period;
use regex::Regex;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\D)(20\d{2})(?:\D|$)").unwrap());

// Spanish first: "mayo" would otherwise never be tried before "may"
const SPANISH_MONTHS: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio",
    "julio", "agosto", "septiembre", "octubre", "noviembre", "diciembre",
];
const ENGLISH_MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

fn month_from_name(lower: &str) -> Option<u32> {
    if lower.contains("setiembre") {
        return Some(9);
    }
    SPANISH_MONTHS
        .iter()
        .position(|m| lower.contains(m))
        .or_else(|| ENGLISH_MONTHS.iter().position(|m| lower.contains(m)))
        .map(|idx| idx as u32 + 1)
}

/// Month and year named in a file name, if both are present
pub fn period_from_filename(name: &str) -> Option<Period> {
    let lower = name.to_lowercase();
    let month = month_from_name(&lower)?;
    let year: i32 = YEAR_RE.captures(&lower)?.get(1)?.as_str().parse().ok()?;
    Period::new(year, month).ok()
}

/// Warning text when the file name names a different month than the data
pub fn period_hint_warning(name: &str, detected: Period) -> Option<String> {
    let hint = period_from_filename(name)?;
    (hint != detected).then(|| {
        format!(
            "File name suggests {} but most rows are dated {}; using {}",
            hint, detected, detected
        )
    })
}
