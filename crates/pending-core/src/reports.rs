//! Report structures for API responses

use serde::{Deserialize, Serialize};

use super::aggregate::{round_amount, ProcessOutcome};
use super::models::TransactionRow;
use super::types::Side;

/// One journal line as shown to users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLineView {
    pub account: String,
    pub side: Side,
    pub amount: String,
}

/// Summary returned by the JSON API and printed by the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessSummary {
    pub file_period: String,
    pub target_period: String,
    /// Rows in the target period
    pub row_count: usize,
    /// Rows read from the upload
    pub total_rows: usize,
    /// Rows with unreadable cells
    pub flagged_rows: usize,
    pub total_debit: String,
    pub total_return: String,
    pub net_amount: String,
    pub journal_required: bool,
    pub journal: Vec<JournalLineView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ProcessSummary {
    /// Build the summary; `all_rows` is the full ingested sheet
    pub fn new(outcome: &ProcessOutcome, all_rows: &[TransactionRow], warnings: Vec<String>) -> Self {
        let result = &outcome.result;
        Self {
            file_period: outcome.file_period.to_string(),
            target_period: outcome.target_period.to_string(),
            row_count: result.row_count(),
            total_rows: all_rows.len(),
            flagged_rows: all_rows.iter().filter(|r| r.is_flagged()).count(),
            total_debit: fixed2(result.total_debit),
            total_return: fixed2(result.total_return),
            net_amount: fixed2(result.net_amount),
            journal_required: result.journal_entry.is_effective(),
            journal: result
                .journal_entry
                .iter()
                .map(|line| JournalLineView {
                    account: line.account.label().to_string(),
                    side: line.side,
                    amount: fixed2(line.amount),
                })
                .collect(),
            warnings,
        }
    }
}

fn fixed2(value: rust_decimal::Decimal) -> String {
    let rounded = round_amount(value);
    // -0.004 rounds to a negative zero
    let rounded = if rounded.is_zero() { rounded.abs() } else { rounded };
    format!("{:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::process;
    use crate::types::RowIssue;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_from_outcome() {
        let rows = vec![
            TransactionRow::new(NaiveDate::from_ymd_opt(2025, 9, 15).unwrap(), dec!(100), dec!(20)),
            TransactionRow::new(NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(), dec!(0), dec!(0)),
            TransactionRow::new(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(), dec!(50), dec!(0)),
            TransactionRow::new(NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(), dec!(30), dec!(10)),
            TransactionRow {
                issues: vec![RowIssue::UnparseableDate],
                ..Default::default()
            },
        ];
        let outcome = process(&rows).unwrap();
        let summary = ProcessSummary::new(&outcome, &rows, vec![]);

        assert_eq!(summary.file_period, "September 2025");
        assert_eq!(summary.target_period, "October 2025");
        assert_eq!(summary.row_count, 2);
        assert_eq!(summary.total_rows, 5);
        assert_eq!(summary.flagged_rows, 1);
        assert_eq!(summary.net_amount, "70.00");
        assert!(summary.journal_required);
        assert_eq!(summary.journal[0].side, Side::Debit);
        assert_eq!(summary.journal[1].amount, "70.00");

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["journal"][0]["side"], "debit");
        assert!(json.get("warnings").is_none());
    }
}
