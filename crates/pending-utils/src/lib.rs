//! Formatting and naming helpers

use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

/// Format an amount with two decimals and thousands separators ("-1,234.50")
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let s = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let mut grouped = String::new();
    let mut count = 0;
    for c in int_part.chars().rev() {
        if count == 3 {
            grouped.push(',');
            count = 0;
        }
        grouped.push(c);
        count += 1;
    }
    let int_grouped: String = grouped.chars().rev().collect();

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}{}.{}", sign, int_grouped, frac_part)
}

/// Escape text for safe interpolation into HTML
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reduce an uploaded file name to a safe single path component.
///
/// Keeps ASCII alphanumerics, `-`, `_` and `.`; spaces become `_`; anything
/// else is dropped. Leading dots are stripped so the result is never hidden
/// or a parent reference.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() => Some(c),
            '-' | '_' | '.' => Some(c),
            ' ' => Some('_'),
            _ => None,
        })
        .collect();
    cleaned.trim_start_matches('.').to_string()
}

/// Upload id: a sortable timestamp plus a random suffix
pub fn generate_upload_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"), &suffix[..12])
}
