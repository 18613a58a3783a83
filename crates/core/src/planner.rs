// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::DutyCalendar;
use crate::command::Command;
use crate::database::PersonnelDatabase;
use crate::error::CoreError;
use crate::execute::execute;
use crate::state::CommandResult;
use crate::storage::PersonnelStorage;
use crate::versioned::VersionedPersonnelDatabase;
use duty_planner_audit::Actor;
use duty_planner_domain::DutySettings;
use time::Date;
use tracing::{info, warn};

/// A planner session: the versioned dataset, its storage and the settings.
///
/// Every command that changes the dataset is saved right after it is
/// committed. A failed save is reported as `CoreError::PersistenceFailure`;
/// the committed change stays in memory.
#[derive(Debug)]
pub struct DutyPlanner<S: PersonnelStorage> {
    storage: S,
    dataset: VersionedPersonnelDatabase,
    settings: DutySettings,
}

impl<S: PersonnelStorage> DutyPlanner<S> {
    /// Loads the stored dataset and catches its calendar up to `today`.
    ///
    /// When nothing is stored an empty dataset for the month of `today` is
    /// used. Rollover happens here, once per load.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid, or loading fails.
    pub fn load(storage: S, settings: DutySettings, today: Date) -> Result<Self, CoreError> {
        settings.validate()?;
        let loaded: Option<PersonnelDatabase> = storage.load().map_err(|err| {
            warn!(error = %err, "Failed to load personnel data");
            CoreError::PersistenceFailure(err.to_string())
        })?;

        let mut calendar: DutyCalendar = DutyCalendar::from_date(today)?;
        let database: PersonnelDatabase = match loaded {
            Some(stored) => {
                let rolled: bool =
                    calendar.set_duty_calendar(stored.calendar().clone(), true, today)?;
                info!(
                    persons = stored.persons().len(),
                    rolled,
                    "Loaded personnel data"
                );
                stored.with_calendar(calendar)
            }
            None => {
                info!("No stored personnel data; starting empty");
                PersonnelDatabase::new(calendar)
            }
        };

        Ok(Self {
            storage,
            dataset: VersionedPersonnelDatabase::new(database),
            settings,
        })
    }

    /// Runs a command and saves the dataset if it changed.
    ///
    /// # Errors
    ///
    /// Returns the command's error, or `CoreError::PersistenceFailure` if
    /// the change was committed but could not be saved.
    pub fn execute(&mut self, command: Command, actor: &Actor) -> Result<CommandResult, CoreError> {
        let result: CommandResult =
            execute(command, actor, &mut self.dataset, &mut self.settings)?;
        if result.modified {
            self.save()?;
        }
        Ok(result)
    }

    /// Saves the live dataset.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::PersistenceFailure` if the storage fails.
    pub fn save(&mut self) -> Result<(), CoreError> {
        self.storage.save(self.dataset.live()).map_err(|err| {
            warn!(error = %err, "Failed to save personnel data");
            CoreError::PersistenceFailure(err.to_string())
        })
    }

    #[must_use]
    pub const fn dataset(&self) -> &VersionedPersonnelDatabase {
        &self.dataset
    }

    /// Returns the dataset mutably, e.g. to subscribe to change notices.
    pub const fn dataset_mut(&mut self) -> &mut VersionedPersonnelDatabase {
        &mut self.dataset
    }

    #[must_use]
    pub const fn settings(&self) -> &DutySettings {
        &self.settings
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}
