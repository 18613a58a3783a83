// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::swap::SwapStatus;
use crate::types::Nric;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// NRIC does not match the expected format.
    InvalidNric(String),
    /// Person name is empty or invalid.
    InvalidName(String),
    /// Another person field (company, section, rank, phone) is invalid.
    InvalidField {
        /// The field that failed validation.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// A person with the same NRIC is already registered.
    DuplicatePerson(Nric),
    /// No person with this NRIC is registered.
    PersonNotFound(Nric),
    /// Day number is outside the month.
    InvalidDay {
        /// The rejected day number.
        day: u8,
        /// Number of days in the month.
        days_in_month: u8,
    },
    /// Month index outside `0..=11` or a year the calendar cannot represent.
    DateOutOfRange {
        /// The year.
        year: i32,
        /// The zero-based month index.
        month_index: u8,
    },
    /// Not enough eligible personnel to staff a day.
    SchedulingInfeasible {
        /// The first day that could not be staffed.
        day: u8,
        /// Personnel required for the day.
        required: u8,
        /// Eligible personnel that were available.
        available: usize,
    },
    /// The roster is confirmed and cannot be rescheduled.
    RosterConfirmed,
    /// The roster cannot be confirmed because a day is short of personnel.
    RosterUnderstaffed {
        /// The first understaffed day.
        day: u8,
    },
    /// Duty settings are invalid.
    InvalidSettings(String),
    /// Reward or penalty amount must be positive.
    InvalidPoints(i64),
    /// A points total would leave the range of `i64`.
    PointsOverflow(Nric),
    /// No swap request exists at this position.
    SwapNotFound(usize),
    /// The actor is not allowed to perform the swap action.
    AuthorizationDenied {
        /// The action that was attempted.
        action: &'static str,
    },
    /// The swap request cannot move from its current state via this action.
    InvalidStateTransition {
        /// The status the request is in.
        from: SwapStatus,
        /// The action that was attempted.
        action: &'static str,
    },
    /// The referenced duty no longer exists or does not hold the expected person.
    DutyNotFound {
        /// The person expected on the duty.
        nric: Nric,
        /// The day of the duty.
        day: u8,
    },
    /// The swap cannot be carried out against the current roster.
    SwapConflict(String),
    /// Current and next months do not follow each other.
    MonthMismatch {
        /// The current month as `(year, month_index)`.
        current: (i32, u8),
        /// The next month as `(year, month_index)`.
        next: (i32, u8),
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNric(msg) => write!(f, "Invalid NRIC: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidField { field, reason } => write!(f, "Invalid {field}: {reason}"),
            Self::DuplicatePerson(nric) => {
                write!(f, "Person with NRIC '{}' already exists", nric.value())
            }
            Self::PersonNotFound(nric) => {
                write!(f, "Person with NRIC '{}' not found", nric.value())
            }
            Self::InvalidDay { day, days_in_month } => {
                write!(
                    f,
                    "Invalid day {day}: must be between 1 and {days_in_month}"
                )
            }
            Self::DateOutOfRange { year, month_index } => {
                write!(f, "Month index {month_index} of year {year} is out of range")
            }
            Self::SchedulingInfeasible {
                day,
                required,
                available,
            } => {
                write!(
                    f,
                    "Cannot schedule day {day}: {required} required but only {available} eligible"
                )
            }
            Self::RosterConfirmed => {
                write!(f, "Roster is confirmed; unconfirm it before rescheduling")
            }
            Self::RosterUnderstaffed { day } => {
                write!(f, "Roster cannot be confirmed: day {day} is understaffed")
            }
            Self::InvalidSettings(msg) => write!(f, "Invalid duty settings: {msg}"),
            Self::InvalidPoints(points) => {
                write!(f, "Invalid points: {points}. Must be greater than 0")
            }
            Self::PointsOverflow(nric) => {
                write!(f, "Points total of '{}' would overflow", nric.value())
            }
            Self::SwapNotFound(index) => write!(f, "Swap request {index} not found"),
            Self::AuthorizationDenied { action } => {
                write!(f, "Not authorized to {action} this swap request")
            }
            Self::InvalidStateTransition { from, action } => {
                write!(f, "Cannot {action} a swap request that is {from}")
            }
            Self::DutyNotFound { nric, day } => {
                write!(
                    f,
                    "No duty on day {day} is assigned to '{}'",
                    nric.value()
                )
            }
            Self::SwapConflict(msg) => write!(f, "Swap conflict: {msg}"),
            Self::MonthMismatch { current, next } => {
                write!(
                    f,
                    "Next month {}-{} does not follow current month {}-{}",
                    next.0,
                    next.1 + 1,
                    current.0,
                    current.1 + 1
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
