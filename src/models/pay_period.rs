//! Pay period model.
//!
//! Pay runs from the 26th of one month through the 25th of the next. The
//! [`PayPeriod::containing`] rule maps any calendar day to exactly one such
//! period, so consecutive periods tile the calendar without gaps or overlap.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Day of month on which every pay period starts.
pub const PERIOD_START_DAY: u32 = 26;

/// Day of month on which every pay period ends.
pub const PERIOD_END_DAY: u32 = 25;

/// Number of periods shown when browsing pay history.
pub const DEFAULT_HISTORY_LENGTH: usize = 10;

/// An inclusive date window for one pay cycle.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::containing(NaiveDate::from_ymd_opt(2025, 3, 26).unwrap());
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2025, 3, 26).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2025, 4, 25).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a period from explicit bounds, rejecting an inverted window.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        let period = Self {
            start_date,
            end_date,
        };
        period.validate()?;
        Ok(period)
    }

    /// Returns the 26th-to-25th period that contains `reference`.
    ///
    /// On or after the 26th the period ends on the 25th of the next month;
    /// otherwise it ends on the 25th of the current month.
    ///
    /// ```
    /// use payroll_engine::models::PayPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let period = PayPeriod::containing(NaiveDate::from_ymd_opt(2025, 3, 25).unwrap());
    /// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2025, 2, 26).unwrap());
    /// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2025, 3, 25).unwrap());
    /// ```
    pub fn containing(reference: NaiveDate) -> Self {
        let (year, month) = if reference.day() >= PERIOD_START_DAY {
            following_month(reference.year(), reference.month())
        } else {
            (reference.year(), reference.month())
        };
        Self::ending_in(year, month)
    }

    /// The period that ends on the 25th of the given month.
    fn ending_in(year: i32, month: u32) -> Self {
        let (start_year, start_month) = preceding_month(year, month);
        Self {
            start_date: calendar_day(start_year, start_month, PERIOD_START_DAY),
            end_date: calendar_day(year, month, PERIOD_END_DAY),
        }
    }

    /// The period immediately before this one.
    pub fn previous(&self) -> Self {
        let (year, month) = preceding_month(self.end_date.year(), self.end_date.month());
        Self::ending_in(year, month)
    }

    /// The period immediately after this one.
    pub fn next(&self) -> Self {
        let (year, month) = following_month(self.end_date.year(), self.end_date.month());
        Self::ending_in(year, month)
    }

    /// `count` consecutive periods, newest first, starting with the one
    /// containing `reference`.
    pub fn history(reference: NaiveDate, count: usize) -> Vec<Self> {
        std::iter::successors(Some(Self::containing(reference)), |p| Some(p.previous()))
            .take(count)
            .collect()
    }

    /// Checks if a given date falls within this pay period (inclusive of both ends).
    ///
    /// ```
    /// use payroll_engine::models::PayPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let period = PayPeriod::containing(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 3, 26).unwrap()));
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 4, 25).unwrap()));
    /// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 4, 26).unwrap()));
    /// ```
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of calendar days covered by the period.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Fails with [`EngineError::InvalidPeriod`] when `start_date > end_date`.
    pub fn validate(&self) -> EngineResult<()> {
        if self.start_date > self.end_date {
            return Err(EngineError::InvalidPeriod {
                start_date: self.start_date,
                end_date: self.end_date,
            });
        }
        Ok(())
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_date, self.end_date)
    }
}

fn preceding_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

fn following_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}

fn calendar_day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("Every month has a 25th and 26th")
}
