//! Calendar month used by monthly payroll totals.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A validated calendar year/month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
}

impl MonthPeriod {
    /// Returns an error unless `month` is 1..=12 and the year is
    /// representable as a calendar date.
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        let period = Self { year, month };
        // Both ends of the range must exist; this rejects years chrono
        // cannot represent.
        period.date_range().ok_or(PeriodError::InvalidYear(year))?;
        Ok(period)
    }

    /// Half-open range `[first day, first day of next month)`.
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        // `new` only builds periods whose range exists.
        self.date_range()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX))
    }

    fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::from_ymd_opt(self.year, self.month, 1)?;
        let end = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year.checked_add(1)?, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)?
        };
        Some((start, end))
    }
}

impl Display for MonthPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodError {
    InvalidMonth(u32),
    InvalidYear(i32),
}

impl Display for PeriodError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth(month) => write!(f, "month must be 1-12, got {month}"),
            Self::InvalidYear(year) => write!(f, "year {year} is out of range"),
        }
    }
}

impl Error for PeriodError {}
