// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Nric, Person};

/// Validates that a person's field constraints are met.
///
/// This function checks formats and required fields.
/// It does NOT check for uniqueness (that requires the registry).
///
/// # Arguments
///
/// * `person` - The person to validate
///
/// # Errors
///
/// Returns an error if:
/// - The NRIC is malformed
/// - The name is empty or contains characters other than letters, digits and spaces
/// - The company, section or rank is empty
/// - The phone number is not at least 3 digits
pub fn validate_person_fields(person: &Person) -> Result<(), DomainError> {
    if !person.nric.is_well_formed() {
        return Err(DomainError::InvalidNric(format!(
            "'{}' must be S/T/F/G, 7 digits and a letter",
            person.nric.value()
        )));
    }

    // Rule: name is alphanumeric words separated by spaces
    let name: &str = person.name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    if !name.chars().all(|c| c.is_alphanumeric() || c == ' ') {
        return Err(DomainError::InvalidName(String::from(
            "Name may only contain letters, digits and spaces",
        )));
    }

    for (field, value) in [
        ("company", &person.company),
        ("section", &person.section),
        ("rank", &person.rank),
    ] {
        if value.trim().is_empty() {
            return Err(DomainError::InvalidField {
                field,
                reason: String::from("cannot be empty"),
            });
        }
    }

    if person.phone.len() < 3 || !person.phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvalidField {
            field: "phone",
            reason: String::from("must be at least 3 digits"),
        });
    }

    Ok(())
}

/// Validates that no registered person already uses this NRIC.
///
/// # Errors
///
/// Returns `DomainError::DuplicatePerson` if the NRIC is taken.
pub fn validate_nric_unique(nric: &Nric, persons: &[Person]) -> Result<(), DomainError> {
    if persons.iter().any(|p| &p.nric == nric) {
        return Err(DomainError::DuplicatePerson(nric.clone()));
    }
    Ok(())
}

/// Validates a reward or penalty amount.
///
/// # Errors
///
/// Returns `DomainError::InvalidPoints` unless the amount is positive.
pub const fn validate_points(points: i64) -> Result<(), DomainError> {
    if points <= 0 {
        return Err(DomainError::InvalidPoints(points));
    }
    Ok(())
}
