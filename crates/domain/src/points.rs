// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The points ledger: per-person running totals with an audit history.
//!
//! Points measure how much duty a person has served. Every scheduled duty
//! credits points; admins may reward (credit) or penalize (debit) points
//! directly. Totals are not clamped and may go negative.
//!
//! Duty credits from one scheduler run form a batch. The most recent batch
//! can be reverted with [`PointsLedger::undo`] until it is sealed, which
//! happens when its roster becomes the current month.

use crate::calendar::YearMonth;
use crate::error::DomainError;
use crate::types::{Nric, Person};
use crate::validation::validate_points;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// What produced a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Points granted by an admin.
    Reward,
    /// Points deducted by an admin.
    Penalize,
    /// Points credited for a scheduled duty.
    Duty,
}

impl EntryKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reward => "reward",
            Self::Penalize => "penalize",
            Self::Duty => "duty",
        }
    }
}

/// One line of a person's ledger history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// What produced this entry.
    pub kind: EntryKind,
    /// Magnitude of the entry; the sign is implied by `kind`.
    pub amount: i64,
    /// Month of the duty, for duty credits.
    pub month: Option<YearMonth>,
    /// Day of the duty, for duty credits.
    pub day: Option<u8>,
    /// Scheduler batch that produced this entry, while still revertible.
    pub batch: Option<u64>,
}

impl LedgerEntry {
    /// Returns the change this entry applied to the running total.
    #[must_use]
    pub const fn signed_amount(&self) -> i64 {
        match self.kind {
            EntryKind::Reward | EntryKind::Duty => self.amount,
            EntryKind::Penalize => -self.amount,
        }
    }
}

/// A person's ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Running point total.
    pub total: i64,
    /// Every entry applied to the total, oldest first.
    pub history: Vec<LedgerEntry>,
}

impl LedgerRow {
    fn push(&mut self, nric: &Nric, entry: LedgerEntry) -> Result<(), DomainError> {
        self.total = self
            .total
            .checked_add(entry.signed_amount())
            .ok_or_else(|| DomainError::PointsOverflow(nric.clone()))?;
        self.history.push(entry);
        Ok(())
    }

    /// Sums the history, or `None` if the sum leaves the range of `i64`.
    #[must_use]
    pub fn history_total(&self) -> Option<i64> {
        sum_entries(&self.history)
    }

    /// Number of duty credits in this row.
    #[must_use]
    pub fn duty_count(&self) -> usize {
        self.history
            .iter()
            .filter(|e| e.kind == EntryKind::Duty)
            .count()
    }
}

/// Sums the signed amounts of `entries` without overflowing.
#[must_use]
pub fn sum_entries(entries: &[LedgerEntry]) -> Option<i64> {
    entries
        .iter()
        .try_fold(0_i64, |sum, entry| sum.checked_add(entry.signed_amount()))
}

/// Per-person points ledger.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointsLedger {
    rows: BTreeMap<Nric, LedgerRow>,
    /// The most recent scheduler batch that may still be reverted.
    pending_batch: Option<u64>,
    /// Identifier for the next scheduler batch.
    next_batch: u64,
}

impl PointsLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            pending_batch: None,
            next_batch: 0,
        }
    }

    /// Rebuilds a ledger from stored rows.
    ///
    /// Batch markers on restored entries are kept; `pending_batch` names the
    /// batch that [`PointsLedger::undo`] will revert.
    #[must_use]
    pub fn from_rows(rows: BTreeMap<Nric, LedgerRow>, pending_batch: Option<u64>) -> Self {
        let next_batch: u64 = rows
            .values()
            .flat_map(|row| row.history.iter())
            .filter_map(|entry| entry.batch)
            .max()
            .map_or(0, |max| max + 1);
        Self {
            rows,
            pending_batch,
            next_batch,
        }
    }

    /// Ensures the person has a ledger row.
    pub fn add_person(&mut self, nric: &Nric) {
        self.rows.entry(nric.clone()).or_default();
    }

    /// Deletes the person's row and history. Does nothing if absent.
    pub fn remove_person(&mut self, nric: &Nric) {
        self.rows.remove(nric);
    }

    /// Moves a row to a new NRIC after a person's identifier changed.
    pub fn rename_person(&mut self, from: &Nric, to: &Nric) {
        if let Some(row) = self.rows.remove(from) {
            self.rows.insert(to.clone(), row);
        }
    }

    /// Returns all rows keyed by NRIC.
    #[must_use]
    pub const fn rows(&self) -> &BTreeMap<Nric, LedgerRow> {
        &self.rows
    }

    /// Returns the person's row, if any.
    #[must_use]
    pub fn row(&self, nric: &Nric) -> Option<&LedgerRow> {
        self.rows.get(nric)
    }

    /// Returns the person's running total; zero when absent.
    #[must_use]
    pub fn total(&self, nric: &Nric) -> i64 {
        self.rows.get(nric).map_or(0, |row| row.total)
    }

    /// Returns the person's history; empty when absent.
    #[must_use]
    pub fn history(&self, nric: &Nric) -> &[LedgerEntry] {
        self.rows.get(nric).map_or(&[], |row| row.history.as_slice())
    }

    /// Returns the batch that [`PointsLedger::undo`] would revert.
    #[must_use]
    pub const fn pending_batch(&self) -> Option<u64> {
        self.pending_batch
    }

    /// Grants points to a person.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPoints` if `amount` is not positive, or
    /// `DomainError::PointsOverflow` if the total would overflow. The ledger
    /// is unchanged on error.
    pub fn reward(&mut self, nric: &Nric, amount: i64) -> Result<(), DomainError> {
        self.adjust(nric, EntryKind::Reward, amount)
    }

    /// Deducts points from a person. The total may become negative.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPoints` if `amount` is not positive, or
    /// `DomainError::PointsOverflow` if the total would overflow. The ledger
    /// is unchanged on error.
    pub fn penalize(&mut self, nric: &Nric, amount: i64) -> Result<(), DomainError> {
        self.adjust(nric, EntryKind::Penalize, amount)
    }

    fn adjust(&mut self, nric: &Nric, kind: EntryKind, amount: i64) -> Result<(), DomainError> {
        validate_points(amount)?;
        self.rows.entry(nric.clone()).or_default().push(
            nric,
            LedgerEntry {
                kind,
                amount,
                month: None,
                day: None,
                batch: None,
            },
        )
    }

    /// Credits one scheduler run's assignments as a new revertible batch.
    ///
    /// Any earlier pending batch becomes permanent.
    ///
    /// # Arguments
    ///
    /// * `month` - The month that was scheduled
    /// * `assignments` - `(day, person)` pairs, one per assigned slot
    /// * `points_per_duty` - Points credited per assignment
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PointsOverflow` if a total would overflow; the
    /// ledger is unchanged in that case.
    pub fn record_schedule(
        &mut self,
        month: YearMonth,
        assignments: &[(u8, Nric)],
        points_per_duty: i64,
    ) -> Result<(), DomainError> {
        let mut staged: Self = self.clone();
        staged.seal_batch();
        let batch: u64 = staged.next_batch;
        for (day, nric) in assignments {
            staged.rows.entry(nric.clone()).or_default().push(
                nric,
                LedgerEntry {
                    kind: EntryKind::Duty,
                    amount: points_per_duty,
                    month: Some(month),
                    day: Some(*day),
                    batch: Some(batch),
                },
            )?;
        }
        staged.next_batch += 1;
        staged.pending_batch = Some(batch);
        *self = staged;
        Ok(())
    }

    /// Reverts the duty credits of the most recent scheduler batch.
    ///
    /// Reward and penalty entries are never touched. Returns the number
    /// of entries removed; zero when there is no pending batch.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PointsOverflow` if a remaining history no
    /// longer sums within range; the ledger is unchanged in that case.
    pub fn undo(&mut self) -> Result<usize, DomainError> {
        let Some(batch) = self.pending_batch else {
            return Ok(0);
        };
        let mut rows: BTreeMap<Nric, LedgerRow> = self.rows.clone();
        let mut removed: usize = 0;
        for (nric, row) in &mut rows {
            let before: usize = row.history.len();
            row.history
                .retain(|e| !(e.kind == EntryKind::Duty && e.batch == Some(batch)));
            removed += before - row.history.len();
            row.total = row
                .history_total()
                .ok_or_else(|| DomainError::PointsOverflow(nric.clone()))?;
        }
        self.rows = rows;
        self.pending_batch = None;
        Ok(removed)
    }

    /// Makes the pending batch permanent so it can no longer be reverted.
    pub fn seal_batch(&mut self) {
        if let Some(batch) = self.pending_batch.take() {
            for entry in self
                .rows
                .values_mut()
                .flat_map(|row| row.history.iter_mut())
                .filter(|e| e.batch == Some(batch))
            {
                entry.batch = None;
            }
        }
    }

    /// Formats every registered person's total, sorted by name.
    #[must_use]
    pub fn print_points(&self, persons: &[Person]) -> String {
        let mut sorted: Vec<&Person> = persons.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.nric.cmp(&b.nric)));

        let mut out: String = String::from("Duty points:");
        for person in sorted {
            // Writing to a String cannot fail
            let _ = write!(out, "\n{}: {}", person.label(), self.total(&person.nric));
        }
        out
    }

    /// Formats one person's total and full history.
    #[must_use]
    pub fn print_details(&self, person: &Person) -> String {
        let history: &[LedgerEntry] = self.history(&person.nric);
        let mut out: String = format!(
            "{} has {} points",
            person.label(),
            self.total(&person.nric)
        );
        if history.is_empty() {
            out.push_str("\nNo records.");
            return out;
        }
        for (i, entry) in history.iter().enumerate() {
            let _ = match (entry.kind, entry.month, entry.day) {
                (EntryKind::Duty, Some(month), Some(day)) => write!(
                    out,
                    "\n{}. Duty on {month}-{day:02}: +{}",
                    i + 1,
                    entry.amount
                ),
                (EntryKind::Penalize, _, _) => {
                    write!(out, "\n{}. Penalized: -{}", i + 1, entry.amount)
                }
                _ => write!(
                    out,
                    "\n{}. {}: +{}",
                    i + 1,
                    if entry.kind == EntryKind::Reward {
                        "Rewarded"
                    } else {
                        "Duty"
                    },
                    entry.amount
                ),
            };
        }
        out
    }
}
