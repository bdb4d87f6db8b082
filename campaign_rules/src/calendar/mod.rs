//! Calendar time for the campaign: a year and a month on a linear scale.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Errors produced when constructing calendar values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Months are numbered 1 through 12.
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u8),
}

/// A point on the campaign calendar.
///
/// Points are compared by their linear index (`year * 12 + month`), so
/// December 1930 sorts directly before January 1931.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimePoint {
    pub year: i32,
    pub month: u8,
}

impl TimePoint {
    /// Create a time point, rejecting months outside 1..=12.
    pub fn new(year: i32, month: u8) -> Result<Self, CalendarError> {
        if !is_valid_month(month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// Linear month index used for ordering and distance.
    pub fn index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month)
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(&self, other: &TimePoint) -> i64 {
        other.index() - self.index()
    }

    /// The following month, rolling over into the next year after December.
    pub fn next_month(&self) -> Self {
        if self.month >= 12 {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl Default for TimePoint {
    fn default() -> Self {
        Self {
            year: 1930,
            month: 1,
        }
    }
}

impl PartialOrd for TimePoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimePoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl std::fmt::Display for TimePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{:02}", self.year, self.month)
    }
}

/// Check whether a month number is in range.
pub fn is_valid_month(month: u8) -> bool {
    (1..=12).contains(&month)
}
