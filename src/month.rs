use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr};
use thiserror::Error;

/// A calendar month bucket, written as `YYYY-MM`.
///
/// Budgets and monthly summaries are keyed by `Month`. Ordering is
/// chronological, which for the canonical zero-padded form is the same as
/// comparing the strings, so `"2024-12" < "2025-03"` holds either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    // Field order matters: the derived `Ord` compares year first.
    year: i32,
    month: u32,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MonthError {
    #[error("'{0}' is not a month in the form YYYY-MM")]
    InvalidFormat(String),
    #[error("month {0} is outside the range 01 - 12")]
    MonthOutOfRange(u32),
}

impl Month {
    pub fn new(year: i32, month: u32) -> Result<Self, MonthError> {
        if !(1..=12).contains(&month) {
            return Err(MonthError::MonthOutOfRange(month));
        }

        // Only four digit years have a fixed width representation
        if !(0..=9999).contains(&year) {
            return Err(MonthError::InvalidFormat(format!("{}-{:02}", year, month)));
        }

        Ok(Month { year, month })
    }

    /// The bucket a date falls into, i.e. its ISO date truncated to year-month.
    /// Fails for dates outside the years `0000` to `9999`.
    pub fn from_date(date: NaiveDate) -> Result<Self, MonthError> {
        Month::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month immediately before this one, wrapping into the previous year.
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Month {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Month {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The twelve selectable months of a year, January first.
    pub fn year_months(year: i32) -> Vec<Month> {
        (1..=12).map(|month| Month { year, month }).collect()
    }
}

impl FromStr for Month {
    type Err = MonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MonthError::InvalidFormat(s.to_owned());

        // Strictly `YYYY-MM`. Anything looser would break the guarantee that the
        // string and chronological orderings agree.
        let bytes = s.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        if !bytes[..4].iter().chain(&bytes[5..]).all(u8::is_ascii_digit) {
            return Err(invalid());
        }

        let year = s[..4].parse().map_err(|_| invalid())?;
        let month = s[5..].parse().map_err(|_| invalid())?;

        Month::new(year, month)
    }
}

impl TryFrom<String> for Month {
    type Error = MonthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> String {
        month.to_string()
    }
}

impl TryFrom<NaiveDate> for Month {
    type Error = MonthError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Month::from_date(date)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
