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

mod apply;
mod calendar;
mod command;
mod database;
mod error;
mod execute;
mod planner;
mod state;
mod storage;
mod versioned;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use calendar::DutyCalendar;
pub use command::{Command, PersonEdit, RequiredRole, RosterMonth};
pub use database::PersonnelDatabase;
pub use error::CoreError;
pub use execute::{authorize, execute};
pub use planner::DutyPlanner;
pub use state::{ApplyOutcome, CommandResult, TransitionResult, UiInteraction};
pub use storage::PersonnelStorage;
pub use versioned::{ChangeNotice, VersionedPersonnelDatabase};
