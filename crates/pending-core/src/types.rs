//! Basic enumerations shared by rows and journal entries

use serde::{Deserialize, Serialize};

/// Posting side of a journal line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Debit,
    Credit,
}

impl Side {
    /// The other side of the posting
    pub fn opposite(self) -> Self {
        match self {
            Side::Debit => Side::Credit,
            Side::Credit => Side::Debit,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Debit => write!(f, "Debit"),
            Side::Credit => write!(f, "Credit"),
        }
    }
}

/// General ledger accounts touched by the pending-debits entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCode {
    /// 22010 - Customer Funds Obligation : Customer Funds Liability
    CustomerFundsLiability,
    /// 21017 - Other Current Liabilities : Accrued Liabilities - Platform
    AccruedPlatformLiabilities,
}

impl AccountCode {
    /// Numeric account number
    pub fn number(&self) -> &'static str {
        match self {
            AccountCode::CustomerFundsLiability => "22010",
            AccountCode::AccruedPlatformLiabilities => "21017",
        }
    }

    /// Full account label as the ERP import expects it
    pub fn label(&self) -> &'static str {
        match self {
            AccountCode::CustomerFundsLiability => {
                "22010 - Customer Funds Obligation : Customer Funds Liability"
            }
            AccountCode::AccruedPlatformLiabilities => {
                "21017 - Other Current Liabilities : Accrued Liabilities - Platform"
            }
        }
    }
}

impl std::fmt::Display for AccountCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Problems found in a single worksheet row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowIssue {
    /// `Date` cell present but not a date
    UnparseableDate,
    /// `Date processed` cell present but not a date
    UnparseableDateProcessed,
    /// `ACH_DEBIT_AMOUNT` cell present but not a number
    NonNumericDebit,
    /// `ACH_RETURN_AMOUNT` cell present but not a number
    NonNumericReturn,
}

impl RowIssue {
    /// Short note shown next to the row in exports
    pub fn description(&self) -> &'static str {
        match self {
            RowIssue::UnparseableDate => "unreadable Date",
            RowIssue::UnparseableDateProcessed => "unreadable Date processed",
            RowIssue::NonNumericDebit => "non-numeric ACH_DEBIT_AMOUNT",
            RowIssue::NonNumericReturn => "non-numeric ACH_RETURN_AMOUNT",
        }
    }
}

impl std::fmt::Display for RowIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
