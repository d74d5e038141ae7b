//! Journal entry template rows for the ERP import

use pending_config::JournalConfig;
use pending_core::ProcessOutcome;
use rust_decimal::Decimal;

/// Column headers of the journal import template
pub const JOURNAL_HEADERS: [&str; 12] = [
    "Debit",
    "Credit",
    "Date",
    "Reversal Date",
    "Memo",
    "Account",
    "Department",
    "Location",
    "Name",
    "Subsidiary",
    "Journal Entry : Memo",
    "Class",
];

/// Note written under a zero-amount entry
pub const NO_ENTRY_NOTE: &str = "No journal entry required (Net Amount = 0)";

/// One line of the journal import template
#[derive(Debug, Clone, PartialEq)]
pub struct JournalTemplateRow {
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
    /// Last day of the file month, `M/D/YYYY`
    pub date: String,
    /// First day of the target month, `M/D/YYYY`
    pub reversal_date: String,
    pub memo: String,
    pub account: &'static str,
    pub department: String,
    pub location: String,
    /// Always blank
    pub name: String,
    pub subsidiary: String,
    pub entry_memo: String,
    pub class: String,
}

impl JournalTemplateRow {
    /// Cells in header order; amounts are left to the caller
    pub fn text_cells(&self) -> [&str; 10] {
        [
            &self.date,
            &self.reversal_date,
            &self.memo,
            self.account,
            &self.department,
            &self.location,
            &self.name,
            &self.subsidiary,
            &self.entry_memo,
            &self.class,
        ]
    }
}

/// Memo for the entry, e.g. "dLocal Pending Debits 09.2025"
pub fn journal_memo(outcome: &ProcessOutcome, meta: &JournalConfig) -> String {
    format!("{} {}", meta.memo_prefix, outcome.file_period.code())
}

/// Both template lines for an outcome, in posting order
pub fn journal_rows(outcome: &ProcessOutcome, meta: &JournalConfig) -> Vec<JournalTemplateRow> {
    let memo = journal_memo(outcome, meta);
    let date = outcome.file_period.last_day_us();
    let reversal_date = outcome.target_period.first_day_us();

    outcome
        .result
        .journal_entry
        .iter()
        .map(|line| JournalTemplateRow {
            debit: line.debit_amount(),
            credit: line.credit_amount(),
            date: date.clone(),
            reversal_date: reversal_date.clone(),
            memo: memo.clone(),
            account: line.account.label(),
            department: meta.department.clone(),
            location: meta.location.clone(),
            name: String::new(),
            subsidiary: meta.subsidiary.clone(),
            entry_memo: memo.clone(),
            class: meta.class.clone(),
        })
        .collect()
}
