//! Calendar months and file-period detection

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::{CoreError, CoreResult};
use super::models::TransactionRow;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// A (year, month) pair with no day component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period; month must be 1-12
    pub fn new(year: i32, month: u32) -> CoreResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::InvalidPeriod { year, month });
        }
        Ok(Self { year, month })
    }

    /// Month containing a date
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The calendar month right after this one
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// Check if a date lies in this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Number of days in the month (leap years included)
    pub fn days_in_month(&self) -> u32 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// English month name
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Zero-padded "MM.YYYY" code used in memos
    pub fn code(&self) -> String {
        format!("{:02}.{}", self.month, self.year)
    }

    /// "M/1/YYYY", the first day in US short form
    pub fn first_day_us(&self) -> String {
        format!("{}/1/{}", self.month, self.year)
    }

    /// "M/D/YYYY" for the last day of the month
    pub fn last_day_us(&self) -> String {
        format!("{}/{}/{}", self.month, self.days_in_month(), self.year)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Detect the file period (the most frequent month among row dates) and the
/// target period that follows it.
///
/// Rows without a usable date are ignored. On equal counts the month seen
/// first in input order wins.
pub fn resolve_periods(rows: &[TransactionRow]) -> CoreResult<(Period, Period)> {
    // insertion order doubles as the tie-break order
    let mut tally: Vec<(Period, usize)> = Vec::new();
    for period in rows.iter().filter_map(|r| r.date).map(Period::of) {
        match tally.iter_mut().find(|(p, _)| *p == period) {
            Some((_, count)) => *count += 1,
            None => tally.push((period, 1)),
        }
    }

    let mut best: Option<(Period, usize)> = None;
    for &(period, count) in &tally {
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((period, count)),
        }
    }

    let (file_period, count) = best.ok_or(CoreError::EmptyInput)?;
    log::debug!(
        "File period {} ({} of {} dated rows, {} distinct months)",
        file_period,
        count,
        tally.iter().map(|(_, c)| c).sum::<usize>(),
        tally.len()
    );

    Ok((file_period, file_period.next()))
}
