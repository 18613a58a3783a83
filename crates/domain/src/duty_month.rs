// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One calendar month's roster and the duty scheduler.
//!
//! The scheduler fills days in order. For each day the eligible candidates
//! are everyone not blocked on that day, not already on that day's duty and
//! not within `min_rest_days` of another of their duties, including duties
//! at the end of the month before. Candidates are
//! ranked by ledger points, fewest first, with the NRIC as a deterministic
//! tie-break. Scheduling is all-or-nothing: if any day cannot be staffed,
//! neither the roster nor the ledger changes.

use crate::calendar::YearMonth;
use crate::duty::Duty;
use crate::error::DomainError;
use crate::points::PointsLedger;
use crate::settings::DutySettings;
use crate::types::{Nric, Person};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Summary of a successful scheduler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutcome {
    /// The first day the run filled, if any day needed filling.
    pub first_day: Option<u8>,
    /// `(day, person)` pairs assigned by this run.
    pub assignments: Vec<(u8, Nric)>,
}

/// The rest-day rule together with the rosters around the month it is
/// applied to.
///
/// Neighbouring rosters are only consulted when they are the months directly
/// before or after.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestContext<'a> {
    /// Minimum number of free days between two duties of one person.
    pub min_rest_days: u8,
    /// The roster of the month before.
    pub previous: Option<&'a DutyMonth>,
    /// The roster of the month after.
    pub following: Option<&'a DutyMonth>,
}

/// The roster for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyMonth {
    year_month: YearMonth,
    first_day_offset: u8,
    duties: Vec<Duty>,
    blocked_dates: BTreeMap<Nric, BTreeSet<u8>>,
    confirmed: bool,
}

impl DutyMonth {
    /// Creates an empty, unconfirmed roster with one unscheduled duty per day.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateOutOfRange` if the month cannot be represented.
    pub fn new(year_month: YearMonth) -> Result<Self, DomainError> {
        let days: u8 = year_month.days()?;
        Ok(Self {
            year_month,
            first_day_offset: year_month.first_day_offset()?,
            duties: (1..=days).map(|day| Duty::new(day, 0)).collect(),
            blocked_dates: BTreeMap::new(),
            confirmed: false,
        })
    }

    /// Rebuilds a roster from stored parts.
    ///
    /// Duties are matched to days by their day number; days without a stored
    /// duty are left unscheduled.
    ///
    /// # Errors
    ///
    /// Returns an error if the month cannot be represented, or a duty or
    /// blocked date names a day outside the month.
    pub fn restore(
        year_month: YearMonth,
        duties: Vec<Duty>,
        blocked_dates: BTreeMap<Nric, BTreeSet<u8>>,
        confirmed: bool,
    ) -> Result<Self, DomainError> {
        let mut month: Self = Self::new(year_month)?;
        for duty in duties {
            let index: usize = month.day_index(duty.day())?;
            month.duties[index] = duty;
        }
        for (nric, days) in blocked_dates {
            month.block_dates(&nric, &days.into_iter().collect::<Vec<u8>>())?;
        }
        month.confirmed = confirmed;
        Ok(month)
    }

    /// Returns the month this roster covers.
    #[must_use]
    pub const fn year_month(&self) -> YearMonth {
        self.year_month
    }

    /// Returns the calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year_month.year
    }

    /// Returns the zero-based month index.
    #[must_use]
    pub const fn month_index(&self) -> u8 {
        self.year_month.month_index
    }

    /// Returns the weekday of day 1 as an offset from Sunday.
    #[must_use]
    pub const fn first_day_offset(&self) -> u8 {
        self.first_day_offset
    }

    /// Returns the number of days in this month.
    #[must_use]
    pub fn days_in_month(&self) -> u8 {
        // One duty per day is an invariant of construction
        u8::try_from(self.duties.len()).unwrap_or(u8::MAX)
    }

    /// Returns every day's duty, in day order.
    #[must_use]
    pub fn scheduled_duties(&self) -> &[Duty] {
        &self.duties
    }

    /// Returns the duty on `day`, if the day is in this month.
    #[must_use]
    pub fn duty(&self, day: u8) -> Option<&Duty> {
        self.duties.iter().find(|d| d.day() == day)
    }

    /// Returns the duties the person is assigned to.
    #[must_use]
    pub fn duties_of(&self, nric: &Nric) -> Vec<&Duty> {
        self.duties.iter().filter(|d| d.contains(nric)).collect()
    }

    /// Returns the unavailability mapping.
    #[must_use]
    pub const fn blocked_dates(&self) -> &BTreeMap<Nric, BTreeSet<u8>> {
        &self.blocked_dates
    }

    /// Returns the days a person is blocked on, ascending.
    #[must_use]
    pub fn blocked_days_of(&self, nric: &Nric) -> Vec<u8> {
        self.blocked_dates
            .get(nric)
            .map(|days| days.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns true if the person is blocked on `day`.
    #[must_use]
    pub fn is_blocked(&self, nric: &Nric, day: u8) -> bool {
        self.blocked_dates
            .get(nric)
            .is_some_and(|days| days.contains(&day))
    }

    /// Returns true if the roster has been confirmed.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    fn day_index(&self, day: u8) -> Result<usize, DomainError> {
        let days_in_month: u8 = self.days_in_month();
        if day == 0 || day > days_in_month {
            return Err(DomainError::InvalidDay { day, days_in_month });
        }
        Ok(usize::from(day - 1))
    }

    /// Marks a person unavailable on the given days.
    ///
    /// Existing assignments are not touched; the roster must be rescheduled
    /// if blocking invalidates it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDay` if any day is outside the month; no
    /// day is blocked in that case.
    pub fn block_dates(&mut self, nric: &Nric, days: &[u8]) -> Result<(), DomainError> {
        for day in days {
            self.day_index(*day)?;
        }
        self.blocked_dates
            .entry(nric.clone())
            .or_default()
            .extend(days.iter().copied());
        Ok(())
    }

    /// Removes every blocked day of a person.
    pub fn clear_blocked_dates(&mut self, nric: &Nric) {
        self.blocked_dates.remove(nric);
    }

    /// Locks the roster as final.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RosterUnderstaffed` naming the first day that
    /// is not fully staffed.
    pub fn confirm(&mut self) -> Result<(), DomainError> {
        if let Some(duty) = self.duties.iter().find(|d| !d.is_fully_staffed()) {
            return Err(DomainError::RosterUnderstaffed { day: duty.day() });
        }
        self.confirmed = true;
        Ok(())
    }

    /// Unlocks the roster.
    pub const fn unconfirm(&mut self) {
        self.confirmed = false;
    }

    /// Empties every day's assignments, keeping blocked dates.
    pub fn clear_all_duties(&mut self) {
        for duty in &mut self.duties {
            duty.clear();
        }
    }

    /// Removes a person from every duty and from the blocked dates.
    pub fn remove_person(&mut self, nric: &Nric) {
        for duty in &mut self.duties {
            duty.remove_person(nric);
        }
        self.blocked_dates.remove(nric);
    }

    /// Rewrites references after a person's NRIC changed.
    pub fn rename_person(&mut self, from: &Nric, to: &Nric) {
        for duty in &mut self.duties {
            duty.replace_person(from, to.clone());
        }
        if let Some(days) = self.blocked_dates.remove(from) {
            self.blocked_dates.insert(to.clone(), days);
        }
    }

    /// Fills every day from the earliest unfilled day to the end of the month.
    ///
    /// Equivalent to [`DutyMonth::schedule_duties_after`] with no previous
    /// month.
    ///
    /// # Errors
    ///
    /// See [`DutyMonth::schedule_duties_after`].
    pub fn schedule_duties(
        &mut self,
        eligible: &[Person],
        settings: &DutySettings,
        ledger: &mut PointsLedger,
    ) -> Result<ScheduleOutcome, DomainError> {
        self.schedule_duties_after(None, eligible, settings, ledger)
    }

    /// Fills every day from the earliest unfilled day to the end of the month.
    ///
    /// Each assignment credits the person with one duty entry in `ledger`,
    /// recorded as a single revertible batch. Duties in `previous` count
    /// towards the rest days of the first days of this month.
    ///
    /// # Arguments
    ///
    /// * `previous` - The roster of the month before, if known
    /// * `eligible` - Persons that may be assigned
    /// * `settings` - Headcount, rest days and points per duty
    /// * `ledger` - Points ledger used for ranking and credited on success
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The roster is confirmed
    /// - The settings are invalid
    /// - Some day has fewer eligible candidates than its headcount
    /// - A points total would overflow
    ///
    /// On error neither the roster nor the ledger is modified.
    pub fn schedule_duties_after(
        &mut self,
        previous: Option<&Self>,
        eligible: &[Person],
        settings: &DutySettings,
        ledger: &mut PointsLedger,
    ) -> Result<ScheduleOutcome, DomainError> {
        if self.confirmed {
            return Err(DomainError::RosterConfirmed);
        }
        settings.validate()?;

        let headcount: u8 = settings.headcount_per_day;
        let Some(start) = self
            .duties
            .iter()
            .position(|d| d.persons().len() < usize::from(headcount))
        else {
            return Ok(ScheduleOutcome {
                first_day: None,
                assignments: Vec::new(),
            });
        };

        let candidates: BTreeSet<&Nric> = eligible.iter().map(|p| &p.nric).collect();
        let mut totals: BTreeMap<&Nric, i64> = candidates
            .iter()
            .map(|nric| (*nric, ledger.total(nric)))
            .collect();
        let rest: RestContext<'_> = RestContext {
            min_rest_days: settings.min_rest_days,
            previous,
            following: None,
        };
        let mut assigned_days: BTreeMap<Nric, Vec<i16>> = self.neighbour_positions(&rest);
        for duty in &self.duties {
            for nric in duty.persons() {
                assigned_days
                    .entry(nric.clone())
                    .or_default()
                    .push(i16::from(duty.day()));
            }
        }

        let mut duties: Vec<Duty> = self.duties.clone();
        let mut assignments: Vec<(u8, Nric)> = Vec::new();

        for duty in &mut duties[start..] {
            let day: u8 = duty.day();
            duty.set_headcount(headcount);
            let needed: usize = usize::from(headcount).saturating_sub(duty.persons().len());
            if needed == 0 {
                continue;
            }

            let mut ranked: Vec<(i64, &Nric)> = candidates
                .iter()
                .copied()
                .filter(|nric| !self.is_blocked(nric, day) && !duty.contains(nric))
                .filter(|nric| {
                    assigned_days
                        .get(*nric)
                        .is_none_or(|days| rests_enough(days, day, settings.min_rest_days))
                })
                .map(|nric| (totals.get(nric).copied().unwrap_or(0), nric))
                .collect();

            if ranked.len() < needed {
                tracing::debug!(
                    day,
                    needed,
                    available = ranked.len(),
                    "not enough eligible personnel"
                );
                return Err(DomainError::SchedulingInfeasible {
                    day,
                    required: headcount,
                    available: duty.persons().len() + ranked.len(),
                });
            }

            ranked.sort();
            for (_, nric) in ranked.into_iter().take(needed) {
                duty.add_person(nric.clone());
                assigned_days
                    .entry(nric.clone())
                    .or_default()
                    .push(i16::from(day));
                if let Some(total) = totals.get_mut(nric) {
                    *total = total
                        .checked_add(settings.points_per_duty)
                        .ok_or_else(|| DomainError::PointsOverflow(nric.clone()))?;
                }
                assignments.push((day, nric.clone()));
            }
        }

        ledger.record_schedule(self.year_month, &assignments, settings.points_per_duty)?;
        self.duties = duties;

        Ok(ScheduleOutcome {
            first_day: u8::try_from(start + 1).ok(),
            assignments,
        })
    }

    /// Exchanges two persons' assignments.
    ///
    /// After the swap `first` serves `second_day` and `second` serves
    /// `first_day`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either day is outside the month
    /// - `first` is not on `first_day` or `second` is not on `second_day`
    /// - Either person is already on the other's day, or blocked on it
    /// - Either person would serve within `rest.min_rest_days` of another
    ///   of their duties, counting the neighbouring months
    pub fn swap_assignments(
        &mut self,
        first: &Nric,
        first_day: u8,
        second: &Nric,
        second_day: u8,
        rest: &RestContext<'_>,
    ) -> Result<(), DomainError> {
        let first_index: usize = self.day_index(first_day)?;
        let second_index: usize = self.day_index(second_day)?;

        if !self.duties[first_index].contains(first) {
            return Err(DomainError::DutyNotFound {
                nric: first.clone(),
                day: first_day,
            });
        }
        if !self.duties[second_index].contains(second) {
            return Err(DomainError::DutyNotFound {
                nric: second.clone(),
                day: second_day,
            });
        }
        if self.duties[first_index].contains(second) || self.duties[second_index].contains(first)
        {
            return Err(DomainError::SwapConflict(format!(
                "{first} and {second} already share a duty on day {first_day} or {second_day}"
            )));
        }
        if self.is_blocked(first, second_day) || self.is_blocked(second, first_day) {
            return Err(DomainError::SwapConflict(String::from(
                "a person is blocked on the day they would take over",
            )));
        }
        let moves: [(&Nric, u8, u8); 2] =
            [(first, first_day, second_day), (second, second_day, first_day)];
        for (nric, vacated, taken) in moves {
            let others: Vec<i16> = self.duty_positions(nric, vacated, rest);
            if !rests_enough(&others, taken, rest.min_rest_days) {
                return Err(DomainError::SwapConflict(format!(
                    "{nric} would not get {} rest days around day {taken}",
                    rest.min_rest_days
                )));
            }
        }

        self.duties[first_index].replace_person(first, second.clone());
        self.duties[second_index].replace_person(second, first.clone());
        Ok(())
    }

    /// Positions of every duty in the neighbouring months, keyed by person.
    ///
    /// Positions count from day 1 of this month: the last day of the month
    /// before is 0, the first day of the month after is `days_in_month + 1`.
    fn neighbour_positions(&self, rest: &RestContext<'_>) -> BTreeMap<Nric, Vec<i16>> {
        let mut positions: BTreeMap<Nric, Vec<i16>> = BTreeMap::new();
        let previous: Option<(&Self, i16)> = rest
            .previous
            .filter(|p| p.year_month.next() == self.year_month)
            .map(|p| (p, -i16::from(p.days_in_month())));
        let following: Option<(&Self, i16)> = rest
            .following
            .filter(|f| self.year_month.next() == f.year_month)
            .map(|f| (f, i16::from(self.days_in_month())));
        for (month, shift) in previous.into_iter().chain(following) {
            for duty in &month.duties {
                for nric in duty.persons() {
                    positions
                        .entry(nric.clone())
                        .or_default()
                        .push(i16::from(duty.day()) + shift);
                }
            }
        }
        positions
    }

    /// Positions of a person's duties other than `vacated`, counting the
    /// neighbouring months.
    fn duty_positions(&self, nric: &Nric, vacated: u8, rest: &RestContext<'_>) -> Vec<i16> {
        let mut positions: Vec<i16> = self
            .neighbour_positions(rest)
            .remove(nric)
            .unwrap_or_default();
        positions.extend(
            self.duties
                .iter()
                .filter(|d| d.day() != vacated && d.contains(nric))
                .map(|d| i16::from(d.day())),
        );
        positions
    }
}

/// Returns true if `day` is more than `min_rest_days` away from every
/// position in `positions`.
fn rests_enough(positions: &[i16], day: u8, min_rest_days: u8) -> bool {
    positions
        .iter()
        .all(|p| p.abs_diff(i16::from(day)) > u16::from(min_rest_days))
}
