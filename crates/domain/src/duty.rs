// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::Nric;
use serde::{Deserialize, Serialize};

/// The assignment of personnel to one calendar day.
///
/// Assigned persons have set semantics: a person appears at most once,
/// in assignment order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duty {
    day: u8,
    headcount: u8,
    persons: Vec<Nric>,
}

impl Duty {
    /// Creates an empty duty for `day` requiring `headcount` persons.
    ///
    /// A headcount of zero marks a day that has not been scheduled yet.
    #[must_use]
    pub const fn new(day: u8, headcount: u8) -> Self {
        Self {
            day,
            headcount,
            persons: Vec::new(),
        }
    }

    /// Creates a duty with existing assignments, dropping duplicates.
    #[must_use]
    pub fn with_persons(day: u8, headcount: u8, persons: Vec<Nric>) -> Self {
        let mut duty: Self = Self::new(day, headcount);
        for nric in persons {
            duty.add_person(nric);
        }
        duty
    }

    /// Returns the day of the month (1-based).
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Returns the number of persons this day requires.
    #[must_use]
    pub const fn headcount(&self) -> u8 {
        self.headcount
    }

    pub(crate) const fn set_headcount(&mut self, headcount: u8) {
        self.headcount = headcount;
    }

    /// Returns the assigned persons in assignment order.
    #[must_use]
    pub fn persons(&self) -> &[Nric] {
        &self.persons
    }

    /// Returns true if the person is assigned to this day.
    #[must_use]
    pub fn contains(&self, nric: &Nric) -> bool {
        self.persons.contains(nric)
    }

    /// Assigns a person. Returns false if they were already assigned.
    pub fn add_person(&mut self, nric: Nric) -> bool {
        if self.contains(&nric) {
            return false;
        }
        self.persons.push(nric);
        true
    }

    /// Unassigns a person. Returns false if they were not assigned.
    pub fn remove_person(&mut self, nric: &Nric) -> bool {
        let before: usize = self.persons.len();
        self.persons.retain(|p| p != nric);
        before != self.persons.len()
    }

    /// Replaces `from` with `to` in place, keeping assignment order.
    ///
    /// Returns false if `from` is not assigned or `to` already is.
    pub fn replace_person(&mut self, from: &Nric, to: Nric) -> bool {
        if self.contains(&to) {
            return false;
        }
        match self.persons.iter_mut().find(|p| *p == from) {
            Some(slot) => {
                *slot = to;
                true
            }
            None => false,
        }
    }

    /// Returns true if the day has been scheduled and has its full headcount.
    #[must_use]
    pub fn is_fully_staffed(&self) -> bool {
        !self.persons.is_empty() && self.persons.len() >= usize::from(self.headcount)
    }

    /// Removes every assignment.
    pub fn clear(&mut self) {
        self.persons.clear();
    }

    /// Formats the co-assigned persons, excluding `nric`.
    #[must_use]
    pub fn persons_string(&self, nric: &Nric) -> String {
        let others: Vec<&str> = self
            .persons
            .iter()
            .filter(|p| *p != nric)
            .map(Nric::value)
            .collect();
        if others.is_empty() {
            String::from("no one else")
        } else {
            others.join(", ")
        }
    }
}
