// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use duty_planner::{DutyCalendar, PersonnelDatabase};
use duty_planner_domain::{DutySettings, Nric, Person, Role, SwapRequest, YearMonth};

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

/// May 2026, so that next month is June.
pub fn may_2026() -> YearMonth {
    YearMonth::new(2026, 4).unwrap()
}

/// A dataset touching every stored part: three persons, June scheduled,
/// a blocked date, a reward and a pending swap request.
pub fn create_populated_database() -> PersonnelDatabase {
    let mut database: PersonnelDatabase =
        PersonnelDatabase::new(DutyCalendar::starting(may_2026()).unwrap());
    for n in 1..=3 {
        database.add_person(create_test_person(n)).unwrap();
    }
    let persons: Vec<Person> = database.persons().to_vec();
    database
        .calendar_mut()
        .schedule_next_month(&persons, &DutySettings::default())
        .unwrap();
    database
        .calendar_mut()
        .next_mut()
        .block_dates(&nric(3), &[10, 11])
        .unwrap();
    database
        .calendar_mut()
        .ledger_mut()
        .reward(&nric(2), 2)
        .unwrap();
    let june: YearMonth = may_2026().next();
    database
        .swaps_mut()
        .submit(SwapRequest::new(nric(1), june, 1, nric(2), 2))
        .unwrap();
    database
}
