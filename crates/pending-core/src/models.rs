//! Core data models: ingested rows and journal entries

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::period::Period;
use super::types::{AccountCode, RowIssue, Side};

/// Cell text exactly as it appeared in the upload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCells {
    pub date: String,
    pub date_processed: String,
    pub debit: String,
    pub return_amount: String,
}

/// One transaction record from the processor export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    /// 1-based worksheet row the record was read from
    pub source_row: u32,
    /// Transaction date; `None` when empty or unreadable
    pub date: Option<NaiveDate>,
    /// ACH_DEBIT_AMOUNT; absent counts as zero
    pub ach_debit_amount: Option<Decimal>,
    /// ACH_RETURN_AMOUNT; absent counts as zero
    pub ach_return_amount: Option<Decimal>,
    pub date_processed: Option<NaiveDate>,
    /// CN column
    pub credit_note: Option<String>,
    /// DN column
    pub debit_note: Option<String>,
    pub raw: RawCells,
    pub issues: Vec<RowIssue>,
}

impl TransactionRow {
    /// Row with a date and both amounts set
    pub fn new(date: NaiveDate, debit: Decimal, return_amount: Decimal) -> Self {
        Self {
            date: Some(date),
            ach_debit_amount: Some(debit),
            ach_return_amount: Some(return_amount),
            ..Default::default()
        }
    }

    /// Debit amount, zero when absent
    pub fn debit(&self) -> Decimal {
        self.ach_debit_amount.unwrap_or(Decimal::ZERO)
    }

    /// Return amount, zero when absent
    pub fn return_amount(&self) -> Decimal {
        self.ach_return_amount.unwrap_or(Decimal::ZERO)
    }

    /// Debit minus return for this row
    pub fn net(&self) -> Decimal {
        self.debit() - self.return_amount()
    }

    /// Check if the row's date falls in the given month
    pub fn in_period(&self, period: Period) -> bool {
        self.date.map_or(false, |d| period.contains(d))
    }

    /// Check if ingestion flagged any cell of this row
    pub fn is_flagged(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Issues joined for display, empty when clean
    pub fn issue_summary(&self) -> String {
        self.issues
            .iter()
            .map(|i| i.description())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// One side of a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    pub account: AccountCode,
    pub side: Side,
    /// Always non-negative, rounded to cents
    pub amount: Decimal,
}

impl JournalLine {
    pub fn new(account: AccountCode, side: Side, amount: Decimal) -> Self {
        Self { account, side, amount }
    }

    /// Amount for the Debit column, if this is a debit line
    pub fn debit_amount(&self) -> Option<Decimal> {
        (self.side == Side::Debit).then_some(self.amount)
    }

    /// Amount for the Credit column, if this is a credit line
    pub fn credit_amount(&self) -> Option<Decimal> {
        (self.side == Side::Credit).then_some(self.amount)
    }
}

/// Balanced two-line posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub lines: [JournalLine; 2],
}

impl JournalEntry {
    /// Build an entry posting `amount` on `first_side` of `first`,
    /// and the opposite side of `second`
    pub fn pair(first: AccountCode, second: AccountCode, first_side: Side, amount: Decimal) -> Self {
        Self {
            lines: [
                JournalLine::new(first, first_side, amount),
                JournalLine::new(second, first_side.opposite(), amount),
            ],
        }
    }

    /// Amount carried by both lines
    pub fn amount(&self) -> Decimal {
        self.lines[0].amount
    }

    /// Equal amounts on opposite sides
    pub fn is_balanced(&self) -> bool {
        self.lines[0].amount == self.lines[1].amount
            && self.lines[0].side == self.lines[1].side.opposite()
    }

    /// Whether posting this entry changes any balance
    pub fn is_effective(&self) -> bool {
        !self.amount().is_zero()
    }

    pub fn iter(&self) -> impl Iterator<Item = &JournalLine> {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_row_amount_defaults() {
        let row = TransactionRow::default();
        assert_eq!(row.debit(), Decimal::ZERO);
        assert_eq!(row.return_amount(), Decimal::ZERO);
        assert_eq!(row.net(), Decimal::ZERO);
        assert!(!row.is_flagged());
    }

    #[test]
    fn test_row_in_period() {
        let row = TransactionRow::new(NaiveDate::from_ymd_opt(2025, 10, 31).unwrap(), dec!(5), dec!(1));
        assert!(row.in_period(Period::new(2025, 10).unwrap()));
        assert!(!row.in_period(Period::new(2024, 10).unwrap()));
        assert_eq!(row.net(), dec!(4));

        let undated = TransactionRow::default();
        assert!(!undated.in_period(Period::new(2025, 10).unwrap()));
    }

    #[test]
    fn test_issue_summary() {
        let row = TransactionRow {
            issues: vec![RowIssue::UnparseableDate, RowIssue::NonNumericDebit],
            ..Default::default()
        };
        assert!(row.is_flagged());
        assert_eq!(row.issue_summary(), "unreadable Date; non-numeric ACH_DEBIT_AMOUNT");
    }

    #[test]
    fn test_journal_line_columns() {
        let line = JournalLine::new(AccountCode::CustomerFundsLiability, Side::Credit, dec!(12.50));
        assert_eq!(line.credit_amount(), Some(dec!(12.50)));
        assert_eq!(line.debit_amount(), None);
    }

    #[test]
    fn test_journal_pair_balanced() {
        let entry = JournalEntry::pair(
            AccountCode::CustomerFundsLiability,
            AccountCode::AccruedPlatformLiabilities,
            Side::Debit,
            dec!(70.00),
        );
        assert!(entry.is_balanced());
        assert!(entry.is_effective());
        assert_eq!(entry.lines[1].side, Side::Credit);
        assert_eq!(entry.iter().count(), 2);
    }
}
