//! Inclusive calendar-day ranges.
//!
//! Ranges are expressed in whole UTC days, both ends inclusive, so
//! `20220701..=20220809` covers 40 days. The bar grid of a range starts at
//! midnight of the first day and ends (exclusive) at midnight after the last.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{constants::TIME_UNITS_IN_ONE_DAY, models::timeframe::TimeFrame};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Invalid date {0}: expected YYYYMMDD")]
    InvalidDate(u32),

    #[error("Range end {last} is before start {first}")]
    Reversed { first: NaiveDate, last: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    first: NaiveDate,
    last: NaiveDate,
}

impl DateRange {
    pub fn new(first: NaiveDate, last: NaiveDate) -> Result<Self, DateRangeError> {
        if last < first {
            return Err(DateRangeError::Reversed { first, last });
        }
        Ok(Self { first, last })
    }

    /// Builds a range from `YYYYMMDD` integers, e.g. `(20220701, 20220809)`.
    pub fn from_yyyymmdd(first: u32, last: u32) -> Result<Self, DateRangeError> {
        Self::new(parse_yyyymmdd(first)?, parse_yyyymmdd(last)?)
    }

    pub const fn first(&self) -> NaiveDate {
        self.first
    }

    pub const fn last(&self) -> NaiveDate {
        self.last
    }

    /// Number of calendar days covered, ends included.
    pub fn days(&self) -> i64 {
        (self.last - self.first).num_days() + 1
    }

    /// Midnight UTC of the first day, in milliseconds.
    pub fn start_millis(&self) -> i64 {
        self.first
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_millis()
    }

    /// Midnight UTC after the last day, in milliseconds (exclusive).
    pub fn end_millis(&self) -> i64 {
        self.start_millis() + self.days() * TIME_UNITS_IN_ONE_DAY
    }

    /// Number of whole bars of `timeframe` that fit in the range.
    pub fn bar_count(&self, timeframe: TimeFrame) -> usize {
        ((self.end_millis() - self.start_millis()) / timeframe.as_millis()) as usize
    }
}

fn parse_yyyymmdd(value: u32) -> Result<NaiveDate, DateRangeError> {
    let (year, month, day) = (value / 10_000, (value / 100) % 100, value % 100);
    NaiveDate::from_ymd_opt(year as i32, month, day).ok_or(DateRangeError::InvalidDate(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forty_days_of_hours() {
        let range = DateRange::from_yyyymmdd(20220701, 20220809).unwrap();
        assert_eq!(range.days(), 40);
        assert_eq!(range.start_millis(), 1_656_633_600_000);
        assert_eq!(range.bar_count(TimeFrame::hours(1).unwrap()), 960);
        assert_eq!(range.bar_count(TimeFrame::days(1).unwrap()), 40);
        // partial trailing bar is not counted
        assert_eq!(range.bar_count(TimeFrame::weeks(1).unwrap()), 5);
    }

    #[test]
    fn single_day_range() {
        let range = DateRange::from_yyyymmdd(20220701, 20220701).unwrap();
        assert_eq!(range.end_millis() - range.start_millis(), TIME_UNITS_IN_ONE_DAY);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            DateRange::from_yyyymmdd(20221301, 20221302),
            Err(DateRangeError::InvalidDate(20221301))
        );
        assert!(matches!(
            DateRange::from_yyyymmdd(20220809, 20220701),
            Err(DateRangeError::Reversed { .. })
        ));
    }
}
