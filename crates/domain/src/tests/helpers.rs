// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DutyMonth, DutySettings, Nric, Person, Role, YearMonth};

/// Builds a valid NRIC from a small number, e.g. 1 -> `S0000001A`.
pub fn nric(n: u32) -> Nric {
    Nric::new(&format!("S{n:07}A"))
}

pub fn create_test_person(n: u32) -> Person {
    Person::new(
        nric(n),
        String::from("Echo"),
        String::from("1"),
        String::from("CPL"),
        format!("Person {n}"),
        String::from("91234567"),
        Role::General,
    )
}

pub fn create_test_persons(count: u32) -> Vec<Person> {
    (1..=count).map(create_test_person).collect()
}

/// A 30-day month (June 2026).
pub fn june_2026() -> DutyMonth {
    DutyMonth::new(YearMonth::new(2026, 5).unwrap()).unwrap()
}

pub fn settings(headcount: u8, rest_days: u8) -> DutySettings {
    DutySettings::new(headcount, rest_days, 1).unwrap()
}
