// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calendar;
mod duty;
mod duty_month;
mod error;
mod points;
mod settings;
mod swap;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use calendar::{MONTHS_IN_YEAR, YearMonth};
pub use duty::Duty;
pub use duty_month::{DutyMonth, RestContext, ScheduleOutcome};
pub use error::DomainError;
pub use points::{EntryKind, LedgerEntry, LedgerRow, PointsLedger, sum_entries};
pub use settings::DutySettings;
pub use swap::{SwapBook, SwapRequest, SwapStatus};
pub use types::{Nric, Person, Role};
pub use validation::{validate_nric_unique, validate_person_fields, validate_points};
