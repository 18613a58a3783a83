// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::data_models::StoredDatabase;
use crate::error::PersistenceError;
use duty_planner::{PersonnelDatabase, PersonnelStorage};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stores the personnel dataset as one pretty-printed JSON file.
///
/// A missing file means nothing has been stored yet. Parent directories
/// are created on the first save.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Creates a storage backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored form without validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read_stored(&self) -> Result<Option<StoredDatabase>, PersistenceError> {
        let json: String = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No data file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Writes the stored form, replacing the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its directory cannot be written.
    pub fn write_stored(&self, stored: &StoredDatabase) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json: String = serde_json::to_string_pretty(stored)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl PersonnelStorage for JsonFileStorage {
    type Error = PersistenceError;

    fn load(&self) -> Result<Option<PersonnelDatabase>, Self::Error> {
        let Some(stored) = self.read_stored()? else {
            return Ok(None);
        };
        let database: PersonnelDatabase = stored.into_database()?;
        info!(
            path = %self.path.display(),
            persons = database.persons().len(),
            "Loaded personnel data"
        );
        Ok(Some(database))
    }

    fn save(&mut self, database: &PersonnelDatabase) -> Result<(), Self::Error> {
        self.write_stored(&StoredDatabase::from(database))?;
        info!(path = %self.path.display(), "Saved personnel data");
        Ok(())
    }
}
