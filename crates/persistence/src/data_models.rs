// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use duty_planner::{DutyCalendar, PersonnelDatabase};
use duty_planner_domain::{
    Duty, DutyMonth, EntryKind, LedgerEntry, LedgerRow, Nric, Person, PointsLedger, Role,
    SwapBook, SwapRequest, SwapStatus, YearMonth, sum_entries,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Serializable representation of the whole personnel dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDatabase {
    pub persons: Vec<StoredPerson>,
    pub current_month: StoredMonth,
    pub next_month: StoredMonth,
    pub ledger: StoredLedger,
    #[serde(default)]
    pub swap_requests: Vec<StoredSwapRequest>,
}

/// Serializable representation of a `Person`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPerson {
    pub nric: String,
    pub company: String,
    pub section: String,
    pub rank: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub role: Role,
}

/// Serializable representation of a `YearMonth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredYearMonth {
    pub year: i32,
    pub month_index: u8,
}

/// Serializable representation of a `DutyMonth`.
///
/// `firstDayOffset` is redundant with the year and month; it is written for
/// readers of the file and checked on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMonth {
    pub year: i32,
    pub month_index: u8,
    pub first_day_offset: u8,
    pub duties: Vec<StoredDuty>,
    #[serde(default)]
    pub blocked_dates: BTreeMap<String, Vec<u8>>,
    #[serde(default)]
    pub confirmed: bool,
}

/// Serializable representation of a `Duty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDuty {
    pub day: u8,
    pub headcount: u8,
    pub person_ids: Vec<String>,
}

/// Serializable representation of a `PointsLedger`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLedger {
    pub rows: Vec<StoredLedgerRow>,
    #[serde(default)]
    pub pending_batch: Option<u64>,
}

/// Serializable representation of one person's `LedgerRow`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLedgerRow {
    pub person_id: String,
    pub total_points: i64,
    pub history: Vec<StoredLedgerEntry>,
}

/// Serializable representation of a `LedgerEntry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLedgerEntry {
    pub kind: EntryKind,
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<StoredYearMonth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<u64>,
}

/// Serializable representation of a `SwapRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSwapRequest {
    pub requester_id: String,
    pub month: StoredYearMonth,
    pub day: u8,
    pub counterpart_id: String,
    pub counterpart_day: u8,
    pub status: SwapStatus,
}

// ============================================================================
// Dataset -> stored form
// ============================================================================

impl From<&PersonnelDatabase> for StoredDatabase {
    fn from(database: &PersonnelDatabase) -> Self {
        let calendar: &DutyCalendar = database.calendar();
        Self {
            persons: database.persons().iter().map(StoredPerson::from).collect(),
            current_month: StoredMonth::from(calendar.current()),
            next_month: StoredMonth::from(calendar.next()),
            ledger: StoredLedger::from(calendar.ledger()),
            swap_requests: database
                .swaps()
                .requests()
                .iter()
                .map(StoredSwapRequest::from)
                .collect(),
        }
    }
}

impl From<&Person> for StoredPerson {
    fn from(person: &Person) -> Self {
        Self {
            nric: person.nric.value().to_string(),
            company: person.company.clone(),
            section: person.section.clone(),
            rank: person.rank.clone(),
            name: person.name.clone(),
            phone: person.phone.clone(),
            role: person.role,
        }
    }
}

impl From<YearMonth> for StoredYearMonth {
    fn from(year_month: YearMonth) -> Self {
        Self {
            year: year_month.year,
            month_index: year_month.month_index,
        }
    }
}

impl From<&DutyMonth> for StoredMonth {
    fn from(month: &DutyMonth) -> Self {
        Self {
            year: month.year(),
            month_index: month.month_index(),
            first_day_offset: month.first_day_offset(),
            duties: month
                .scheduled_duties()
                .iter()
                .map(|duty: &Duty| StoredDuty {
                    day: duty.day(),
                    headcount: duty.headcount(),
                    person_ids: duty.persons().iter().map(|n| n.value().to_string()).collect(),
                })
                .collect(),
            blocked_dates: month
                .blocked_dates()
                .iter()
                .filter(|(_, days)| !days.is_empty())
                .map(|(nric, days)| (nric.value().to_string(), days.iter().copied().collect()))
                .collect(),
            confirmed: month.is_confirmed(),
        }
    }
}

impl From<&PointsLedger> for StoredLedger {
    fn from(ledger: &PointsLedger) -> Self {
        Self {
            rows: ledger
                .rows()
                .iter()
                .map(|(nric, row)| StoredLedgerRow {
                    person_id: nric.value().to_string(),
                    total_points: row.total,
                    history: row.history.iter().map(StoredLedgerEntry::from).collect(),
                })
                .collect(),
            pending_batch: ledger.pending_batch(),
        }
    }
}

impl From<&LedgerEntry> for StoredLedgerEntry {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            kind: entry.kind,
            amount: entry.amount,
            month: entry.month.map(StoredYearMonth::from),
            day: entry.day,
            batch: entry.batch,
        }
    }
}

impl From<&SwapRequest> for StoredSwapRequest {
    fn from(request: &SwapRequest) -> Self {
        Self {
            requester_id: request.requester.value().to_string(),
            month: StoredYearMonth::from(request.month),
            day: request.day,
            counterpart_id: request.counterpart.value().to_string(),
            counterpart_day: request.counterpart_day,
            status: request.status,
        }
    }
}

// ============================================================================
// Stored form -> dataset
// ============================================================================

impl StoredDatabase {
    /// Converts the stored form into a validated dataset.
    ///
    /// The calendar is taken as stored; rollover is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidData` if:
    /// - A person is invalid or listed twice
    /// - A month cannot be represented, its day offset is wrong, or a duty
    ///   or blocked date lies outside it
    /// - The next month does not follow the current month
    /// - A ledger row is listed twice or its total does not match its history
    /// - Any duty, blocked date, ledger row or swap request names an unknown NRIC
    pub fn into_database(self) -> Result<PersonnelDatabase, PersistenceError> {
        let persons: Vec<Person> = self
            .persons
            .into_iter()
            .map(StoredPerson::into_person)
            .collect();
        let calendar: DutyCalendar = DutyCalendar::from_parts(
            self.current_month.into_month()?,
            self.next_month.into_month()?,
            self.ledger.into_ledger()?,
        )?;
        let swaps: Vec<SwapRequest> = self
            .swap_requests
            .into_iter()
            .map(StoredSwapRequest::into_request)
            .collect::<Result<Vec<SwapRequest>, PersistenceError>>()?;

        Ok(PersonnelDatabase::from_parts(
            persons,
            calendar,
            SwapBook::from_requests(swaps),
        )?)
    }
}

impl StoredPerson {
    fn into_person(self) -> Person {
        Person::new(
            Nric::new(&self.nric),
            self.company,
            self.section,
            self.rank,
            self.name,
            self.phone,
            self.role,
        )
    }
}

impl StoredYearMonth {
    fn into_year_month(self) -> Result<YearMonth, PersistenceError> {
        Ok(YearMonth::new(self.year, self.month_index)?)
    }
}

impl StoredMonth {
    fn into_month(self) -> Result<DutyMonth, PersistenceError> {
        let year_month: YearMonth = YearMonth::new(self.year, self.month_index)?;
        let expected_offset: u8 = year_month.first_day_offset()?;
        if self.first_day_offset != expected_offset {
            return Err(PersistenceError::InvalidData(format!(
                "first day offset of {year_month} is {}, expected {expected_offset}",
                self.first_day_offset
            )));
        }

        let duties: Vec<Duty> = self
            .duties
            .into_iter()
            .map(|duty| {
                Duty::with_persons(
                    duty.day,
                    duty.headcount,
                    duty.person_ids.iter().map(|id| Nric::new(id.as_str())).collect(),
                )
            })
            .collect();
        let blocked_dates: BTreeMap<Nric, BTreeSet<u8>> = self
            .blocked_dates
            .into_iter()
            .filter(|(_, days)| !days.is_empty())
            .map(|(id, days)| (Nric::new(&id), days.into_iter().collect()))
            .collect();

        Ok(DutyMonth::restore(
            year_month,
            duties,
            blocked_dates,
            self.confirmed,
        )?)
    }
}

impl StoredLedger {
    fn into_ledger(self) -> Result<PointsLedger, PersistenceError> {
        let mut rows: BTreeMap<Nric, LedgerRow> = BTreeMap::new();
        for stored in self.rows {
            let nric: Nric = Nric::new(&stored.person_id);
            let history: Vec<LedgerEntry> = stored
                .history
                .into_iter()
                .map(StoredLedgerEntry::into_entry)
                .collect::<Result<Vec<LedgerEntry>, PersistenceError>>()?;
            let sum: i64 = sum_entries(&history).ok_or_else(|| {
                PersistenceError::InvalidData(format!("ledger history of '{nric}' overflows"))
            })?;
            if sum != stored.total_points {
                return Err(PersistenceError::InvalidData(format!(
                    "ledger total {} for '{nric}' does not match its history ({sum})",
                    stored.total_points
                )));
            }
            let row: LedgerRow = LedgerRow {
                total: stored.total_points,
                history,
            };
            if rows.insert(nric.clone(), row).is_some() {
                return Err(PersistenceError::InvalidData(format!(
                    "ledger lists '{nric}' more than once"
                )));
            }
        }
        Ok(PointsLedger::from_rows(rows, self.pending_batch))
    }
}

impl StoredLedgerEntry {
    fn into_entry(self) -> Result<LedgerEntry, PersistenceError> {
        if self.amount <= 0 {
            return Err(PersistenceError::InvalidData(format!(
                "ledger amount must be positive, got {}",
                self.amount
            )));
        }
        Ok(LedgerEntry {
            kind: self.kind,
            amount: self.amount,
            month: self.month.map(StoredYearMonth::into_year_month).transpose()?,
            day: self.day,
            batch: self.batch,
        })
    }
}

impl StoredSwapRequest {
    fn into_request(self) -> Result<SwapRequest, PersistenceError> {
        let mut request: SwapRequest = SwapRequest::new(
            Nric::new(&self.requester_id),
            self.month.into_year_month()?,
            self.day,
            Nric::new(&self.counterpart_id),
            self.counterpart_day,
        );
        request.status = self.status;
        Ok(request)
    }
}
