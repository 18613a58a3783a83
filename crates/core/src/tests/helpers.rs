// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Command, CommandResult, CoreError, DutyCalendar, PersonnelDatabase, PersonnelStorage,
    VersionedPersonnelDatabase, execute,
};
use duty_planner_audit::Actor;
use duty_planner_domain::{DutySettings, Nric, Person, Role, YearMonth};

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

pub fn admin() -> Actor {
    Actor::admin()
}

pub fn general(n: u32) -> Actor {
    Actor::general(nric(n))
}

pub fn settings() -> DutySettings {
    DutySettings::default()
}

/// May 2026, so that next month is June (30 days).
pub fn may_2026() -> YearMonth {
    YearMonth::new(2026, 4).unwrap()
}

pub fn june_2026() -> YearMonth {
    YearMonth::new(2026, 5).unwrap()
}

/// An empty dataset whose next month is June 2026.
pub fn create_test_database() -> PersonnelDatabase {
    PersonnelDatabase::new(DutyCalendar::starting(may_2026()).unwrap())
}

/// A dataset with `count` persons registered directly, without commands.
pub fn create_database_with_persons(count: u32) -> PersonnelDatabase {
    let mut database: PersonnelDatabase = create_test_database();
    for n in 1..=count {
        database.add_person(create_test_person(n)).unwrap();
    }
    database
}

pub fn run(
    dataset: &mut VersionedPersonnelDatabase,
    actor: &Actor,
    command: Command,
) -> Result<CommandResult, CoreError> {
    execute(command, actor, dataset, &mut settings())
}

/// A versioned dataset with `count` persons and June scheduled at one
/// person per day.
pub fn create_scheduled_dataset(count: u32) -> VersionedPersonnelDatabase {
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(create_database_with_persons(count));
    run(&mut dataset, &admin(), Command::Schedule).unwrap();
    dataset
}

/// Storage kept in memory, counting saves.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    pub stored: Option<PersonnelDatabase>,
    pub saves: usize,
    pub fail_saves: bool,
}

#[derive(Debug)]
pub struct MemoryStorageError;

impl std::fmt::Display for MemoryStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "disk full")
    }
}

impl std::error::Error for MemoryStorageError {}

impl PersonnelStorage for MemoryStorage {
    type Error = MemoryStorageError;

    fn load(&self) -> Result<Option<PersonnelDatabase>, Self::Error> {
        Ok(self.stored.clone())
    }

    fn save(&mut self, database: &PersonnelDatabase) -> Result<(), Self::Error> {
        if self.fail_saves {
            return Err(MemoryStorageError);
        }
        self.stored = Some(database.clone());
        self.saves += 1;
        Ok(())
    }
}
