// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Scheduler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutySettings {
    /// Personnel required on every day.
    pub headcount_per_day: u8,
    /// Minimum number of free days between two duties of one person.
    ///
    /// Zero allows duties on consecutive days.
    pub min_rest_days: u8,
    /// Points credited to a person for each duty served.
    pub points_per_duty: i64,
}

impl DutySettings {
    /// Creates validated duty settings.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSettings` if the headcount or the
    /// points per duty is not positive.
    pub fn new(
        headcount_per_day: u8,
        min_rest_days: u8,
        points_per_duty: i64,
    ) -> Result<Self, DomainError> {
        let settings: Self = Self {
            headcount_per_day,
            min_rest_days,
            points_per_duty,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Checks the invariants of these settings.
    ///
    /// Deserialized settings bypass [`DutySettings::new`] and must be
    /// validated before use.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSettings` on a zero headcount or
    /// non-positive points per duty.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.headcount_per_day == 0 {
            return Err(DomainError::InvalidSettings(String::from(
                "headcount per day must be at least 1",
            )));
        }
        if self.points_per_duty <= 0 {
            return Err(DomainError::InvalidSettings(String::from(
                "points per duty must be greater than 0",
            )));
        }
        Ok(())
    }
}

impl Default for DutySettings {
    fn default() -> Self {
        Self {
            headcount_per_day: 1,
            min_rest_days: 0,
            points_per_duty: 1,
        }
    }
}

impl std::fmt::Display for DutySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} per day, {} rest days, {} points per duty",
            self.headcount_per_day, self.min_rest_days, self.points_per_duty
        )
    }
}
