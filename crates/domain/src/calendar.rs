// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar arithmetic for month rosters.
//!
//! Months are addressed by year and zero-based month index (January = 0).

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// Number of months in a year.
pub const MONTHS_IN_YEAR: u8 = 12;

/// A calendar month addressed by year and zero-based month index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    /// The calendar year.
    pub year: i32,
    /// Zero-based month index (0 = January, 11 = December).
    pub month_index: u8,
}

impl YearMonth {
    /// Creates a `YearMonth`, validating the month index and year.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateOutOfRange` if the month index is not in
    /// `0..=11` or the year cannot be represented.
    pub fn new(year: i32, month_index: u8) -> Result<Self, DomainError> {
        let year_month: Self = Self { year, month_index };
        // Validates both components against the calendar
        year_month.first_date()?;
        Ok(year_month)
    }

    /// Returns the month containing `date`.
    #[must_use]
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month_index: u8::from(date.month()) - 1,
        }
    }

    /// Returns the following month, rolling December over into January.
    #[must_use]
    pub const fn next(&self) -> Self {
        if self.month_index + 1 >= MONTHS_IN_YEAR {
            Self {
                year: self.year + 1,
                month_index: 0,
            }
        } else {
            Self {
                year: self.year,
                month_index: self.month_index + 1,
            }
        }
    }

    /// Returns the `time::Month` for this month.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateOutOfRange` if the month index is invalid.
    pub fn month(&self) -> Result<Month, DomainError> {
        Month::try_from(self.month_index.saturating_add(1)).map_err(|_| {
            DomainError::DateOutOfRange {
                year: self.year,
                month_index: self.month_index,
            }
        })
    }

    /// Returns the first day of the month.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateOutOfRange` if the month cannot be represented.
    pub fn first_date(&self) -> Result<Date, DomainError> {
        Date::from_calendar_date(self.year, self.month()?, 1).map_err(|_| {
            DomainError::DateOutOfRange {
                year: self.year,
                month_index: self.month_index,
            }
        })
    }

    /// Returns the number of days in the month.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateOutOfRange` if the month index is invalid.
    pub fn days(&self) -> Result<u8, DomainError> {
        Ok(self.month()?.length(self.year))
    }

    /// Returns the weekday of day 1 as an offset from Sunday (0 = Sunday).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateOutOfRange` if the month cannot be represented.
    pub fn first_day_offset(&self) -> Result<u8, DomainError> {
        Ok(self.first_date()?.weekday().number_days_from_sunday())
    }

    /// Returns the English month name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateOutOfRange` if the month index is invalid.
    pub fn name(&self) -> Result<String, DomainError> {
        Ok(self.month()?.to_string())
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month_index + 1)
    }
}
