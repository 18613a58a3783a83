// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the duty planner.
//!
//! The personnel dataset is stored as a single JSON document:
//!
//! ```text
//! {
//!   "persons":      [ ... ],
//!   "currentMonth": { year, monthIndex, firstDayOffset, duties, blockedDates, confirmed },
//!   "nextMonth":    { ... },
//!   "ledger":       { rows, pendingBatch },
//!   "swapRequests": [ ... ]
//! }
//! ```
//!
//! Every reference in a loaded document is checked before it becomes a
//! dataset. Invalid documents are rejected as a whole with
//! [`PersistenceError::InvalidData`].
//!
//! User preferences (data file location and duty settings) live in a
//! separate JSON file, see [`UserPrefs`].

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
#![allow(clippy::multiple_crate_versions)]

mod data_models;
mod error;
mod json_storage;
mod prefs;

#[cfg(test)]
mod tests;

pub use data_models::{
    StoredDatabase, StoredDuty, StoredLedger, StoredLedgerEntry, StoredLedgerRow, StoredMonth,
    StoredPerson, StoredSwapRequest, StoredYearMonth,
};
pub use error::PersistenceError;
pub use json_storage::JsonFileStorage;
pub use prefs::{DEFAULT_DATA_FILE, UserPrefs};
