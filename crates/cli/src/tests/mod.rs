// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use duty_planner::DutyPlanner;
use duty_planner_domain::{DutySettings, Nric, Person, Role};
use duty_planner_persistence::JsonFileStorage;
use tempfile::TempDir;
use time::macros::date;

pub fn nric(n: u32) -> Nric {
    Nric::new(&format!("S{n:07}A"))
}

pub fn create_test_person(n: u32, role: Role) -> Person {
    Person::new(
        nric(n),
        String::from("Echo"),
        String::from("1"),
        String::from("CPL"),
        format!("Person {n}"),
        String::from("91234567"),
        role,
    )
}

/// A planner backed by a fresh data file in a temporary directory.
pub fn create_test_planner() -> (TempDir, DutyPlanner<JsonFileStorage>) {
    let dir: TempDir = TempDir::new().unwrap();
    let storage: JsonFileStorage = JsonFileStorage::new(dir.path().join("data.json"));
    let planner: DutyPlanner<JsonFileStorage> =
        DutyPlanner::load(storage, DutySettings::default(), date!(2026 - 05 - 15)).unwrap();
    (dir, planner)
}
