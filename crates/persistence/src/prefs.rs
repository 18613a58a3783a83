// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use duty_planner_domain::DutySettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default location of the personnel data file.
pub const DEFAULT_DATA_FILE: &str = "data/personneldatabase.json";

/// User preferences: where the data lives and how duties are scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPrefs {
    pub data_file_path: PathBuf,
    #[serde(default)]
    pub duty_settings: DutySettings,
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self {
            data_file_path: PathBuf::from(DEFAULT_DATA_FILE),
            duty_settings: DutySettings::default(),
        }
    }
}

impl UserPrefs {
    /// Reads preferences from `path`.
    ///
    /// A missing file yields the defaults, which are written to `path`.
    /// A file that cannot be parsed, or holds invalid duty settings, is
    /// left untouched and the defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or the
    /// defaults cannot be written.
    pub fn load_or_default(path: &Path) -> Result<Self, PersistenceError> {
        let json: String = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No preferences file; writing defaults");
                let prefs: Self = Self::default();
                prefs.save(path)?;
                return Ok(prefs);
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Self>(&json) {
            Ok(prefs) if prefs.duty_settings.validate().is_ok() => Ok(prefs),
            Ok(_) => {
                warn!(
                    path = %path.display(),
                    "Preferences hold invalid duty settings; using defaults"
                );
                Ok(Self::default())
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Preferences file is malformed; using defaults"
                );
                Ok(Self::default())
            }
        }
    }

    /// Writes preferences to `path`, creating its directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
