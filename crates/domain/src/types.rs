// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A person's NRIC, the sole identifier for personnel.
///
/// The value is normalized to uppercase. Format validation happens in
/// [`Nric::parse`]; [`Nric::new`] only normalizes and is used where the
/// value has already been validated (e.g. test fixtures, persisted data
/// that is re-validated on load).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Nric {
    value: String,
}

impl Nric {
    /// Creates a new `Nric` without format validation.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Parses and validates an NRIC.
    ///
    /// A valid NRIC is one of `S`, `T`, `F` or `G`, followed by seven digits
    /// and a trailing letter, e.g. `S9012345L`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidNric` if the value does not match.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let nric: Self = Self::new(value);
        if nric.is_well_formed() {
            Ok(nric)
        } else {
            Err(DomainError::InvalidNric(format!(
                "'{value}' must be S/T/F/G, 7 digits and a letter"
            )))
        }
    }

    /// Returns true if the value matches the NRIC format.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let bytes: &[u8] = self.value.as_bytes();
        bytes.len() == 9
            && matches!(bytes[0], b'S' | b'T' | b'F' | b'G')
            && bytes[1..8].iter().all(u8::is_ascii_digit)
            && bytes[8].is_ascii_uppercase()
    }

    /// Returns the NRIC value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for Nric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Authority level of a person or actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Manages personnel, schedules, points and swap approvals.
    Admin,
    /// Regular personnel: blocks dates, requests and accepts swaps.
    #[default]
    General,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::General => "general",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "general" => Ok(Self::General),
            _ => Err(DomainError::InvalidField {
                field: "role",
                reason: format!("unknown role '{s}'"),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A member of the personnel registry.
///
/// Identity is the NRIC; all other fields are descriptive. Duties, ledger
/// rows and swap requests refer to a person by NRIC only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// The person's NRIC.
    pub nric: Nric,
    /// The company the person belongs to.
    pub company: String,
    /// The section within the company.
    pub section: String,
    /// The person's rank, e.g. "CPL".
    pub rank: String,
    /// The person's full name.
    pub name: String,
    /// Contact number.
    pub phone: String,
    /// Authority level.
    pub role: Role,
}

impl Person {
    /// Creates a new `Person`.
    ///
    /// Field constraints are checked separately by
    /// [`validate_person_fields`](crate::validate_person_fields).
    #[must_use]
    pub const fn new(
        nric: Nric,
        company: String,
        section: String,
        rank: String,
        name: String,
        phone: String,
        role: Role,
    ) -> Self {
        Self {
            nric,
            company,
            section,
            rank,
            name,
            phone,
            role,
        }
    }

    /// Returns true if both records describe the same person.
    #[must_use]
    pub fn is_same_person(&self, other: &Self) -> bool {
        self.nric == other.nric
    }

    /// Short label used in command feedback, e.g. `CPL Brandon Foo (S9012345L)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.rank, self.name, self.nric)
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Company: {} Section: {} Rank: {} Name: {} Phone: {}",
            self.nric, self.company, self.section, self.rank, self.name, self.phone
        )
    }
}
