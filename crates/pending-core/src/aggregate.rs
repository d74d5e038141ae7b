//! Target-period filtering, totals and journal entry derivation

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::error::CoreResult;
use super::models::{JournalEntry, TransactionRow};
use super::period::{resolve_periods, Period};
use super::types::{AccountCode, Side};

/// Totals and journal entry for the rows of one target month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Rows dated in the target period, input order preserved
    pub filtered_rows: Vec<TransactionRow>,
    pub total_debit: Decimal,
    pub total_return: Decimal,
    /// `total_debit - total_return`, unrounded
    pub net_amount: Decimal,
    pub journal_entry: JournalEntry,
}

impl AggregationResult {
    pub fn row_count(&self) -> usize {
        self.filtered_rows.len()
    }

    /// Net amount rounded half-up to cents
    pub fn net_amount_rounded(&self) -> Decimal {
        round_amount(self.net_amount)
    }
}

/// Periods plus aggregation for one upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    pub file_period: Period,
    pub target_period: Period,
    pub result: AggregationResult,
}

/// Round to two decimals, halves away from zero
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Filter `rows` to `target` and total them up.
///
/// An empty selection is not an error; it yields zero totals and a
/// zero-amount entry.
pub fn aggregate(rows: &[TransactionRow], target: Period) -> AggregationResult {
    let filtered_rows: Vec<TransactionRow> = rows
        .iter()
        .filter(|r| r.in_period(target))
        .cloned()
        .collect();

    let total_debit: Decimal = filtered_rows.iter().map(TransactionRow::debit).sum();
    let total_return: Decimal = filtered_rows.iter().map(TransactionRow::return_amount).sum();
    let net_amount = total_debit - total_return;

    log::debug!(
        "Aggregated {} of {} rows for {}: debit={} return={} net={}",
        filtered_rows.len(),
        rows.len(),
        target,
        total_debit,
        total_return,
        net_amount
    );

    AggregationResult {
        filtered_rows,
        total_debit,
        total_return,
        net_amount,
        journal_entry: derive_journal_entry(net_amount),
    }
}

/// Two-line entry between 22010 and 21017 for a net amount.
///
/// Positive: debit 22010, credit 21017. Negative: credit 22010, debit 21017.
/// Zero (after rounding) keeps the positive-case sides with zero amounts.
pub fn derive_journal_entry(net_amount: Decimal) -> JournalEntry {
    let rounded = round_amount(net_amount);
    let side = if rounded.is_sign_negative() && !rounded.is_zero() {
        Side::Credit
    } else {
        Side::Debit
    };
    let mut amount = rounded.abs();
    amount.rescale(2);

    JournalEntry::pair(
        AccountCode::CustomerFundsLiability,
        AccountCode::AccruedPlatformLiabilities,
        side,
        amount,
    )
}

/// Resolve periods and aggregate the target month in one call
pub fn process(rows: &[TransactionRow]) -> CoreResult<ProcessOutcome> {
    let (file_period, target_period) = resolve_periods(rows)?;
    let result = aggregate(rows, target_period);
    Ok(ProcessOutcome {
        file_period,
        target_period,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn row(y: i32, m: u32, d: u32, debit: Decimal, ret: Decimal) -> TransactionRow {
        TransactionRow::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), debit, ret)
    }

    // a second, empty September row keeps September the dominant month
    fn scenario_a() -> Vec<TransactionRow> {
        vec![
            row(2025, 9, 15, dec!(100), dec!(20)),
            row(2025, 9, 30, dec!(0), dec!(0)),
            row(2025, 10, 1, dec!(50), dec!(0)),
            row(2025, 10, 15, dec!(30), dec!(10)),
        ]
    }

    #[test]
    fn test_scenario_a_positive_net() {
        let rows = scenario_a();
        let outcome = process(&rows).unwrap();
        assert_eq!(outcome.file_period, Period::new(2025, 9).unwrap());
        assert_eq!(outcome.target_period, Period::new(2025, 10).unwrap());

        let result = outcome.result;
        assert_eq!(result.filtered_rows, rows[2..].to_vec());
        assert_eq!(result.total_debit, dec!(80));
        assert_eq!(result.total_return, dec!(10));
        assert_eq!(result.net_amount, dec!(70));

        let [first, second] = result.journal_entry.lines;
        assert_eq!(first.account, AccountCode::CustomerFundsLiability);
        assert_eq!(first.side, Side::Debit);
        assert_eq!(first.amount.to_string(), "70.00");
        assert_eq!(second.account, AccountCode::AccruedPlatformLiabilities);
        assert_eq!(second.side, Side::Credit);
        assert_eq!(second.amount.to_string(), "70.00");
    }

    #[test]
    fn test_scenario_b_negative_net() {
        let rows = vec![
            row(2025, 9, 15, dec!(100), dec!(20)),
            row(2025, 9, 16, dec!(5), dec!(0)),
            row(2025, 10, 1, dec!(10), dec!(40)),
        ];
        let result = process(&rows).unwrap().result;
        assert_eq!(result.net_amount, dec!(-30));

        let [first, second] = result.journal_entry.lines;
        assert_eq!(first.account, AccountCode::CustomerFundsLiability);
        assert_eq!(first.side, Side::Credit);
        assert_eq!(first.amount.to_string(), "30.00");
        assert_eq!(second.account, AccountCode::AccruedPlatformLiabilities);
        assert_eq!(second.side, Side::Debit);
        assert_eq!(second.amount.to_string(), "30.00");
    }

    #[test]
    fn test_scenario_c_nothing_in_target_month() {
        let rows = vec![
            row(2025, 9, 1, dec!(10), dec!(0)),
            row(2025, 9, 2, dec!(20), dec!(5)),
        ];
        let result = process(&rows).unwrap().result;
        assert!(result.filtered_rows.is_empty());
        assert_eq!(result.total_debit, Decimal::ZERO);
        assert_eq!(result.total_return, Decimal::ZERO);
        assert_eq!(result.net_amount, Decimal::ZERO);
        assert!(result.journal_entry.is_balanced());
        assert!(!result.journal_entry.is_effective());
        assert_eq!(result.journal_entry.lines[0].side, Side::Debit);
        assert_eq!(result.journal_entry.lines[1].side, Side::Credit);
    }

    #[test]
    fn test_scenario_d_no_dates() {
        let rows = vec![TransactionRow {
            ach_debit_amount: Some(dec!(10)),
            ..Default::default()
        }];
        assert!(matches!(process(&rows), Err(CoreError::EmptyInput)));
    }

    #[test]
    fn test_december_file_totals_january_of_next_year() {
        let rows = vec![
            row(2024, 12, 2, dec!(15), dec!(0)),
            row(2024, 12, 15, dec!(0), dec!(0)),
            row(2024, 12, 31, dec!(20), dec!(5)),
            row(2025, 1, 3, dec!(60), dec!(10)),
            row(2024, 1, 20, dec!(999), dec!(0)),
            row(2025, 1, 31, dec!(5), dec!(0)),
        ];
        let outcome = process(&rows).unwrap();
        assert_eq!(outcome.file_period, Period::new(2024, 12).unwrap());
        assert_eq!(outcome.target_period, Period::new(2025, 1).unwrap());
        assert_eq!(outcome.result.filtered_rows, vec![rows[3].clone(), rows[5].clone()]);
        assert_eq!(outcome.result.net_amount, dec!(55));
        assert_eq!(outcome.result.journal_entry.lines[0].side, Side::Debit);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let rows = scenario_a();
        let target = Period::new(2025, 10).unwrap();
        assert_eq!(aggregate(&rows, target), aggregate(&rows, target));
    }

    #[test]
    fn test_net_identity_with_fractional_amounts() {
        let rows = vec![
            row(2025, 10, 1, dec!(0.105), dec!(0.002)),
            row(2025, 10, 2, dec!(1234.333), dec!(0.001)),
            TransactionRow {
                date: NaiveDate::from_ymd_opt(2025, 10, 3),
                ach_debit_amount: None,
                ach_return_amount: Some(dec!(0.01)),
                ..Default::default()
            },
        ];
        let result = aggregate(&rows, Period::new(2025, 10).unwrap());
        assert_eq!(result.total_debit - result.total_return, result.net_amount);
        assert_eq!(result.net_amount, dec!(1234.425));
        // full precision internally, half-up at output
        assert_eq!(result.net_amount_rounded().to_string(), "1234.43");
        assert_eq!(result.journal_entry.amount().to_string(), "1234.43");
    }

    #[test]
    fn test_filter_preserves_order_and_excludes_other_years() {
        let rows = vec![
            row(2025, 10, 20, dec!(1), dec!(0)),
            row(2024, 10, 20, dec!(2), dec!(0)),
            row(2025, 10, 5, dec!(3), dec!(0)),
            TransactionRow::default(),
        ];
        let result = aggregate(&rows, Period::new(2025, 10).unwrap());
        let debits: Vec<Decimal> = result.filtered_rows.iter().map(|r| r.debit()).collect();
        assert_eq!(debits, vec![dec!(1), dec!(3)]);
    }

    #[test]
    fn test_derive_rounding_to_zero() {
        let entry = derive_journal_entry(dec!(-0.004));
        assert!(!entry.is_effective());
        assert_eq!(entry.lines[0].side, Side::Debit);
        assert_eq!(entry.amount().to_string(), "0.00");
    }

    #[test]
    fn test_derive_half_up() {
        assert_eq!(derive_journal_entry(dec!(2.345)).amount(), dec!(2.35));
        let negative = derive_journal_entry(dec!(-2.345));
        assert_eq!(negative.amount(), dec!(2.35));
        assert_eq!(negative.lines[0].side, Side::Credit);
    }

    #[test]
    fn test_entry_always_balanced() {
        for net in [dec!(-1000.5), dec!(-0.01), dec!(0), dec!(0.01), dec!(99999.999)] {
            let entry = derive_journal_entry(net);
            assert!(entry.is_balanced(), "unbalanced for {}", net);
            assert!(!entry.amount().is_sign_negative());
        }
    }
}
