// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_test_person;
use crate::{DomainError, Nric, Person, Role};
use std::str::FromStr;

#[test]
fn test_nric_is_normalized_to_uppercase() {
    let nric: Nric = Nric::new(" s9012345l ");
    assert_eq!(nric.value(), "S9012345L");
}

#[test]
fn test_nric_parse_accepts_valid_values() {
    for value in ["S9012345L", "T0123456Z", "F1234567N", "g7654321x"] {
        assert!(Nric::parse(value).is_ok(), "{value} should be valid");
    }
}

#[test]
fn test_nric_parse_rejects_invalid_values() {
    for value in ["", "S123", "A9012345L", "S90123451", "S9012345LL", "SABCDEFGL"] {
        assert!(
            matches!(Nric::parse(value), Err(DomainError::InvalidNric(_))),
            "{value} should be invalid"
        );
    }
}

#[test]
fn test_role_round_trips_through_strings() {
    assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
    assert_eq!(Role::from_str("GENERAL").unwrap(), Role::General);
    assert_eq!(Role::Admin.to_string(), "admin");
    assert!(Role::from_str("captain").is_err());
}

#[test]
fn test_same_person_compares_nric_only() {
    let person: Person = create_test_person(1);
    let mut renamed: Person = person.clone();
    renamed.name = String::from("Someone Else");

    assert!(person.is_same_person(&renamed));
    assert_ne!(person, renamed);
    assert!(!person.is_same_person(&create_test_person(2)));
}

#[test]
fn test_person_label_includes_rank_name_and_nric() {
    let person: Person = create_test_person(7);
    assert_eq!(person.label(), "CPL Person 7 (S0000007A)");
}
