// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::DutyCalendar;
use crate::error::CoreError;
use duty_planner_audit::StateSnapshot;
use duty_planner_domain::{
    DomainError, DutyMonth, Nric, Person, RestContext, Role, SwapBook, SwapRequest,
    validate_nric_unique, validate_person_fields,
};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// The complete personnel dataset: registry, calendar and swap requests.
///
/// One value of this type is one version in the undo/redo history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonnelDatabase {
    persons: Vec<Person>,
    calendar: DutyCalendar,
    swaps: SwapBook,
}

impl PersonnelDatabase {
    /// Creates an empty registry around a calendar.
    #[must_use]
    pub const fn new(calendar: DutyCalendar) -> Self {
        Self {
            persons: Vec::new(),
            calendar,
            swaps: SwapBook::new(),
        }
    }

    /// Rebuilds a dataset from stored parts, checking every reference.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A person's fields are invalid
    /// - Two persons share an NRIC
    /// - A duty, blocked date, ledger row or open swap request names an
    ///   unknown NRIC
    ///
    /// Finished swap requests may name persons that were deleted since.
    pub fn from_parts(
        persons: Vec<Person>,
        calendar: DutyCalendar,
        swaps: SwapBook,
    ) -> Result<Self, DomainError> {
        let mut known: BTreeSet<&Nric> = BTreeSet::new();
        for person in &persons {
            validate_person_fields(person)?;
            if !known.insert(&person.nric) {
                return Err(DomainError::DuplicatePerson(person.nric.clone()));
            }
        }

        let check = |nric: &Nric| -> Result<(), DomainError> {
            if known.contains(nric) {
                Ok(())
            } else {
                Err(DomainError::PersonNotFound(nric.clone()))
            }
        };
        for month in [calendar.current(), calendar.next()] {
            for duty in month.scheduled_duties() {
                duty.persons().iter().try_for_each(check)?;
            }
            month.blocked_dates().keys().try_for_each(check)?;
        }
        calendar.ledger().rows().keys().try_for_each(check)?;
        for request in swaps.requests().iter().filter(|r| !r.status.is_terminal()) {
            check(&request.requester)?;
            check(&request.counterpart)?;
        }

        Ok(Self {
            persons,
            calendar,
            swaps,
        })
    }

    /// Returns the registered persons in registration order.
    #[must_use]
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    #[must_use]
    pub const fn calendar(&self) -> &DutyCalendar {
        &self.calendar
    }

    pub const fn calendar_mut(&mut self) -> &mut DutyCalendar {
        &mut self.calendar
    }

    #[must_use]
    pub const fn swaps(&self) -> &SwapBook {
        &self.swaps
    }

    pub const fn swaps_mut(&mut self) -> &mut SwapBook {
        &mut self.swaps
    }

    /// Replaces the calendar, keeping the registry and swap requests.
    #[must_use]
    pub fn with_calendar(self, calendar: DutyCalendar) -> Self {
        Self { calendar, ..self }
    }

    /// Returns the person at a one-based position in the registry.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidIndex` if no person is at that position.
    pub fn person_at(&self, index: usize) -> Result<&Person, CoreError> {
        index
            .checked_sub(1)
            .and_then(|i| self.persons.get(i))
            .ok_or(CoreError::InvalidIndex(index))
    }

    /// Returns the registered person with this NRIC.
    #[must_use]
    pub fn find_person(&self, nric: &Nric) -> Option<&Person> {
        self.persons.iter().find(|p| &p.nric == nric)
    }

    #[must_use]
    pub fn has_person(&self, nric: &Nric) -> bool {
        self.find_person(nric).is_some()
    }

    /// Registers a new person with an empty ledger row.
    ///
    /// # Errors
    ///
    /// Returns an error if the person's fields are invalid or the NRIC is
    /// already registered.
    pub fn add_person(&mut self, person: Person) -> Result<(), DomainError> {
        validate_person_fields(&person)?;
        validate_nric_unique(&person.nric, &self.persons)?;
        self.calendar.ledger_mut().add_person(&person.nric);
        self.persons.push(person);
        Ok(())
    }

    /// Replaces the person at a zero-based position.
    ///
    /// When the NRIC changes, duties, blocked dates, ledger rows and swap
    /// requests are moved to the new NRIC.
    ///
    /// # Errors
    ///
    /// Returns an error if the edited fields are invalid or the new NRIC
    /// belongs to another person.
    pub fn replace_person(&mut self, position: usize, edited: Person) -> Result<(), DomainError> {
        let Some(original) = self.persons.get(position) else {
            return Err(DomainError::PersonNotFound(edited.nric));
        };
        validate_person_fields(&edited)?;
        let old_nric: Nric = original.nric.clone();
        if old_nric != edited.nric {
            let others: Vec<Person> = self
                .persons
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != position)
                .map(|(_, p)| p.clone())
                .collect();
            validate_nric_unique(&edited.nric, &others)?;
            self.calendar.rename_person(&old_nric, &edited.nric);
            self.swaps.rename_person(&old_nric, &edited.nric);
        }
        self.persons[position] = edited;
        Ok(())
    }

    /// Removes a person and every reference to them.
    ///
    /// Duties in both months, blocked dates and the ledger row are dropped.
    /// Open swap requests naming the person are cancelled.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PersonNotFound` if the NRIC is not registered.
    pub fn remove_person(&mut self, nric: &Nric) -> Result<Person, DomainError> {
        let Some(position) = self.persons.iter().position(|p| &p.nric == nric) else {
            return Err(DomainError::PersonNotFound(nric.clone()));
        };
        let removed: Person = self.persons.remove(position);
        self.calendar.remove_person(nric);
        self.swaps.remove_person(nric);
        Ok(removed)
    }

    /// Orders the registry by name, then NRIC. Returns false if it was
    /// already in that order.
    pub fn sort_persons(&mut self) -> bool {
        if self.persons.is_sorted_by(|a, b| person_order(a, b).is_le()) {
            return false;
        }
        self.persons.sort_by(person_order);
        true
    }

    /// Drops every person and swap request and starts a fresh calendar for
    /// the same current month.
    ///
    /// # Errors
    ///
    /// Returns an error if the fresh months cannot be represented.
    pub fn cleared(&self) -> Result<Self, DomainError> {
        Ok(Self::new(DutyCalendar::starting(
            self.calendar.current().year_month(),
        )?))
    }

    /// Approves the swap request at a zero-based position, exchanging the
    /// duties in its roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist, the role is not
    /// admin, the request is not accepted, the duties no longer match, or a
    /// person would serve within `min_rest_days` of another duty.
    pub fn approve_swap(
        &mut self,
        position: usize,
        role: Role,
        min_rest_days: u8,
    ) -> Result<&SwapRequest, DomainError> {
        let request: &mut SwapRequest = self.swaps.get_mut(position)?;
        match self.calendar.roster_in_context_mut(request.month, min_rest_days) {
            Some((roster, rest)) => request.approve(role, Some(roster), &rest)?,
            None => request.approve(role, None, &RestContext::default())?,
        }
        Ok(request)
    }

    /// Converts the dataset to a short summary for audit records.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let next: &DutyMonth = self.calendar.next();
        let assigned: usize = next
            .scheduled_duties()
            .iter()
            .map(|d| d.persons().len())
            .sum();
        StateSnapshot::new(format!(
            "persons={},current={},next={},next_assigned={},next_confirmed={},swap_requests={}",
            self.persons.len(),
            self.calendar.current().year_month(),
            next.year_month(),
            assigned,
            next.is_confirmed(),
            self.swaps.requests().len()
        ))
    }
}

fn person_order(a: &Person, b: &Person) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.nric.cmp(&b.nric))
}
