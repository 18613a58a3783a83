// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::database::PersonnelDatabase;

/// Loads and saves the personnel dataset.
///
/// The core never touches storage itself; the session hands it the live
/// dataset after every change.
pub trait PersonnelStorage {
    /// The error reported by this storage.
    type Error: std::error::Error;

    /// Loads the stored dataset, or `None` if nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if stored data exists but cannot be read or is invalid.
    fn load(&self) -> Result<Option<PersonnelDatabase>, Self::Error>;

    /// Stores the dataset, replacing what was stored before.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be written.
    fn save(&mut self, database: &PersonnelDatabase) -> Result<(), Self::Error>;
}
