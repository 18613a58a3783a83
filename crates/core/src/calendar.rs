// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The two-month duty calendar.
//!
//! The calendar always holds the roster for the wall-clock month
//! (`current`) and the one after it (`next`), together with the points
//! ledger. Only `next` is ever scheduled; `current` is whatever `next`
//! was when the month turned over.

use duty_planner_domain::{
    DomainError, DutyMonth, DutySettings, Nric, Person, PointsLedger, RestContext,
    ScheduleOutcome, YearMonth,
};
use time::{Date, OffsetDateTime};
use tracing::{debug, info};

/// The current and next month rosters plus the points ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutyCalendar {
    current: DutyMonth,
    next: DutyMonth,
    ledger: PointsLedger,
}

impl DutyCalendar {
    /// Creates an empty calendar for the real current month.
    ///
    /// # Errors
    ///
    /// Returns an error if the current date cannot be represented.
    pub fn new() -> Result<Self, DomainError> {
        Self::from_date(OffsetDateTime::now_utc().date())
    }

    /// Creates an empty calendar for the month containing `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the month cannot be represented.
    pub fn from_date(today: Date) -> Result<Self, DomainError> {
        Self::starting(YearMonth::from_date(today))
    }

    /// Creates an empty calendar whose current month is `current`.
    ///
    /// # Errors
    ///
    /// Returns an error if either month cannot be represented.
    pub fn starting(current: YearMonth) -> Result<Self, DomainError> {
        Ok(Self {
            current: DutyMonth::new(current)?,
            next: DutyMonth::new(current.next())?,
            ledger: PointsLedger::new(),
        })
    }

    /// Rebuilds a calendar from stored parts.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MonthMismatch` if `next` is not the month
    /// directly after `current`.
    pub fn from_parts(
        current: DutyMonth,
        next: DutyMonth,
        ledger: PointsLedger,
    ) -> Result<Self, DomainError> {
        let expected: YearMonth = current.year_month().next();
        if next.year_month() != expected {
            return Err(DomainError::MonthMismatch {
                current: (current.year(), current.month_index()),
                next: (next.year(), next.month_index()),
            });
        }
        Ok(Self {
            current,
            next,
            ledger,
        })
    }

    #[must_use]
    pub const fn current(&self) -> &DutyMonth {
        &self.current
    }

    #[must_use]
    pub const fn next(&self) -> &DutyMonth {
        &self.next
    }

    #[must_use]
    pub const fn ledger(&self) -> &PointsLedger {
        &self.ledger
    }

    pub const fn ledger_mut(&mut self) -> &mut PointsLedger {
        &mut self.ledger
    }

    pub const fn next_mut(&mut self) -> &mut DutyMonth {
        &mut self.next
    }

    /// Returns the roster for a month, if the calendar still holds it.
    #[must_use]
    pub fn roster(&self, month: YearMonth) -> Option<&DutyMonth> {
        [&self.current, &self.next]
            .into_iter()
            .find(|m| m.year_month() == month)
    }

    /// Returns the roster for a month mutably together with the rest-day
    /// rule and the roster on its other side, if the calendar holds it.
    pub fn roster_in_context_mut(
        &mut self,
        month: YearMonth,
        min_rest_days: u8,
    ) -> Option<(&mut DutyMonth, RestContext<'_>)> {
        let Self { current, next, .. } = self;
        if current.year_month() == month {
            let rest: RestContext<'_> = RestContext {
                min_rest_days,
                previous: None,
                following: Some(&*next),
            };
            Some((current, rest))
        } else if next.year_month() == month {
            let rest: RestContext<'_> = RestContext {
                min_rest_days,
                previous: Some(&*current),
                following: None,
            };
            Some((next, rest))
        } else {
            None
        }
    }

    /// Replaces this calendar with `other`, catching up to `today` if asked.
    ///
    /// Without rollover, or when `other` is not behind `today`, the rosters
    /// are copied verbatim. Otherwise the calendar rolls over once:
    /// `other`'s next month becomes current when it is the month of `today`,
    /// else a fresh current month is created because more than one month has
    /// passed. A fresh next month is always created and the pending ledger
    /// batch is sealed.
    ///
    /// Returns true if a rollover happened.
    ///
    /// # Arguments
    ///
    /// * `other` - The calendar to take over, typically loaded from storage
    /// * `needs_rollover` - Whether to catch up to `today`
    /// * `today` - The wall-clock date
    ///
    /// # Errors
    ///
    /// Returns an error if a fresh month cannot be represented.
    pub fn set_duty_calendar(
        &mut self,
        other: Self,
        needs_rollover: bool,
        today: Date,
    ) -> Result<bool, DomainError> {
        let today_month: YearMonth = YearMonth::from_date(today);
        if !needs_rollover || other.current.year_month() >= today_month {
            *self = other;
            return Ok(false);
        }

        let Self {
            current: stale_current,
            next: stale_next,
            mut ledger,
        } = other;
        let current: DutyMonth = if stale_next.year_month() == today_month {
            stale_next
        } else {
            DutyMonth::new(today_month)?
        };
        let next: DutyMonth = DutyMonth::new(today_month.next())?;
        ledger.seal_batch();

        info!(
            from = %stale_current.year_month(),
            to = %current.year_month(),
            "Rolled duty calendar over"
        );
        *self = Self {
            current,
            next,
            ledger,
        };
        Ok(true)
    }

    /// Schedules the next month.
    ///
    /// An earlier unconfirmed schedule is discarded first: its duties are
    /// cleared and its ledger batch reverted. Duties at the end of the
    /// current month count towards the rest days. On error the calendar is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RosterConfirmed` if the next month is confirmed,
    /// `DomainError::SchedulingInfeasible` if some day cannot be staffed, or
    /// `DomainError::PointsOverflow` if a points total would overflow.
    pub fn schedule_next_month(
        &mut self,
        persons: &[Person],
        settings: &DutySettings,
    ) -> Result<ScheduleOutcome, DomainError> {
        if self.next.is_confirmed() {
            return Err(DomainError::RosterConfirmed);
        }
        let mut next: DutyMonth = self.next.clone();
        let mut ledger: PointsLedger = self.ledger.clone();
        if next.scheduled_duties().iter().any(|d| !d.persons().is_empty()) {
            let reverted: usize = ledger.undo()?;
            next.clear_all_duties();
            debug!(reverted, "Discarded previous unconfirmed schedule");
        }

        let outcome: ScheduleOutcome =
            next.schedule_duties_after(Some(&self.current), persons, settings, &mut ledger)?;
        info!(
            month = %next.year_month(),
            assignments = outcome.assignments.len(),
            "Scheduled next month"
        );
        self.next = next;
        self.ledger = ledger;
        Ok(outcome)
    }

    /// Confirms the next month.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RosterUnderstaffed` if any day is understaffed.
    pub fn confirm_next_month(&mut self) -> Result<(), DomainError> {
        self.next.confirm()
    }

    /// Unconfirms the next month. Assignments are kept.
    pub const fn unconfirm_next_month(&mut self) {
        self.next.unconfirm();
    }

    /// Throws away the next month's schedule after the registry changed.
    ///
    /// Clears every next-month duty, unconfirms the roster and reverts the
    /// ledger batch of the last scheduler run. Returns true if the roster
    /// had been confirmed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PointsOverflow` if reverting the batch would
    /// overflow a total; the calendar is unchanged in that case.
    pub fn invalidate_next_month(&mut self) -> Result<bool, DomainError> {
        let reverted: usize = self.ledger.undo()?;
        let was_confirmed: bool = self.next.is_confirmed();
        self.next.clear_all_duties();
        self.next.unconfirm();
        debug!(reverted, was_confirmed, "Invalidated next month schedule");
        Ok(was_confirmed)
    }

    /// Removes a person from both rosters and the ledger.
    pub fn remove_person(&mut self, nric: &Nric) {
        self.current.remove_person(nric);
        self.next.remove_person(nric);
        self.ledger.remove_person(nric);
    }

    /// Rewrites references after a person's NRIC changed.
    pub fn rename_person(&mut self, from: &Nric, to: &Nric) {
        self.current.rename_person(from, to);
        self.next.rename_person(from, to);
        self.ledger.rename_person(from, to);
    }
}
