// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use duty_planner_audit::Actor;
use duty_planner_domain::{Nric, Person, Role};

/// Who may run a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredRole {
    /// Only admin actors.
    Admin,
    /// Only actors tied to a registered person.
    Personnel,
    /// Every actor.
    Any,
}

impl RequiredRole {
    /// Returns true if the actor may run a command requiring this role.
    #[must_use]
    pub fn permits(self, actor: &Actor) -> bool {
        match self {
            Self::Admin => actor.role == Role::Admin,
            Self::Personnel => actor.nric.is_some(),
            Self::Any => true,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Personnel => "personnel",
            Self::Any => "any user",
        }
    }
}

impl std::fmt::Display for RequiredRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the calendar's two rosters a command refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterMonth {
    Current,
    Next,
}

/// Field changes for an edit. `None` keeps the existing value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonEdit {
    pub nric: Option<Nric>,
    pub company: Option<String>,
    pub section: Option<String>,
    pub rank: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
}

impl PersonEdit {
    /// Returns true if no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nric.is_none()
            && self.company.is_none()
            && self.section.is_none()
            && self.rank.is_none()
            && self.name.is_none()
            && self.phone.is_none()
            && self.role.is_none()
    }

    /// Builds the edited person from `person`.
    #[must_use]
    pub fn apply_to(&self, person: &Person) -> Person {
        Person::new(
            self.nric.clone().unwrap_or_else(|| person.nric.clone()),
            self.company.clone().unwrap_or_else(|| person.company.clone()),
            self.section.clone().unwrap_or_else(|| person.section.clone()),
            self.rank.clone().unwrap_or_else(|| person.rank.clone()),
            self.name.clone().unwrap_or_else(|| person.name.clone()),
            self.phone.clone().unwrap_or_else(|| person.phone.clone()),
            self.role.unwrap_or(person.role),
        )
    }
}

/// A command represents user intent as data only.
///
/// Commands are the only way to request changes to the personnel dataset.
/// Person and swap indices are one-based, as shown to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a new person.
    AddPerson {
        /// The person to register.
        person: Person,
    },
    /// Change the fields of a registered person.
    EditPerson {
        /// Position of the person in the registry.
        index: usize,
        /// The fields to change.
        edit: PersonEdit,
    },
    /// Remove a person and every reference to them.
    DeletePerson {
        /// Position of the person in the registry.
        index: usize,
    },
    /// Remove every person and start an empty calendar.
    Clear,
    /// List the registry.
    List,
    /// List the persons whose name contains one of the keywords.
    Find {
        /// Whole words matched against names, ignoring case.
        keywords: Vec<String>,
    },
    /// Order the registry by name.
    Sort,
    /// Fill the next month's roster.
    Schedule,
    /// Lock the next month's roster.
    ConfirmSchedule,
    /// Unlock the next month's roster.
    Unconfirm,
    /// Mark the actor unavailable on days of the next month.
    BlockDate {
        /// Days of the next month.
        days: Vec<u8>,
    },
    /// Clear every blocked day of the actor in the next month.
    RemoveBlock,
    /// Show the actor's blocked days in the next month.
    ViewBlock,
    /// Deduct points from persons.
    Penalize {
        /// Points to deduct from each person.
        points: i64,
        /// Positions of the persons in the registry.
        indices: Vec<usize>,
    },
    /// Grant points to persons.
    Reward {
        /// Points to grant to each person.
        points: i64,
        /// Positions of the persons in the registry.
        indices: Vec<usize>,
    },
    /// Show every total, or one person's total and history.
    Points {
        /// Position of the person in the registry.
        index: Option<usize>,
    },
    /// Show the actor's duties in both months.
    View,
    /// Show a month's roster day by day.
    ViewRoster {
        /// The roster to show.
        month: RosterMonth,
    },
    /// Offer one of the actor's duties in exchange for another person's.
    RequestSwap {
        /// The roster both duties are in.
        month: RosterMonth,
        /// The actor's duty day being offered.
        day: u8,
        /// Position of the counterpart in the registry.
        counterpart: usize,
        /// The counterpart's duty day asked for in exchange.
        counterpart_day: u8,
    },
    /// List swap requests.
    Swaps,
    /// Accept a swap request addressed to the actor.
    AcceptSwap {
        /// Position of the request.
        index: usize,
    },
    /// Approve an accepted swap request and exchange the duties.
    ApproveSwap {
        /// Position of the request.
        index: usize,
    },
    /// Reject a swap request.
    RejectSwap {
        /// Position of the request.
        index: usize,
    },
    /// Return to the state before the last committed command.
    Undo,
    /// Reapply the last undone command.
    Redo,
    /// List the commands that produced the live dataset, most recent first.
    History,
    /// Change the scheduler settings of the session. `None` keeps a value.
    DutySettings {
        /// Personnel required per day.
        headcount: Option<u8>,
        /// Free days required between two duties of one person.
        rest_days: Option<u8>,
        /// Points credited per duty.
        points: Option<i64>,
    },
}

impl Command {
    /// Returns the command name used in audit records and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddPerson { .. } => "AddPerson",
            Self::EditPerson { .. } => "EditPerson",
            Self::DeletePerson { .. } => "DeletePerson",
            Self::Clear => "Clear",
            Self::List => "List",
            Self::Find { .. } => "Find",
            Self::Sort => "Sort",
            Self::Schedule => "Schedule",
            Self::ConfirmSchedule => "ConfirmSchedule",
            Self::Unconfirm => "Unconfirm",
            Self::BlockDate { .. } => "BlockDate",
            Self::RemoveBlock => "RemoveBlock",
            Self::ViewBlock => "ViewBlock",
            Self::Penalize { .. } => "Penalize",
            Self::Reward { .. } => "Reward",
            Self::Points { .. } => "Points",
            Self::View => "View",
            Self::ViewRoster { .. } => "ViewRoster",
            Self::RequestSwap { .. } => "RequestSwap",
            Self::Swaps => "Swaps",
            Self::AcceptSwap { .. } => "AcceptSwap",
            Self::ApproveSwap { .. } => "ApproveSwap",
            Self::RejectSwap { .. } => "RejectSwap",
            Self::Undo => "Undo",
            Self::Redo => "Redo",
            Self::History => "History",
            Self::DutySettings { .. } => "DutySettings",
        }
    }

    /// Returns the role an actor needs to run this command.
    ///
    /// `RejectSwap` is open to every actor here; whether the actor may
    /// reject a particular request is decided by the request itself.
    #[must_use]
    pub const fn required_role(&self) -> RequiredRole {
        match self {
            Self::AddPerson { .. }
            | Self::EditPerson { .. }
            | Self::DeletePerson { .. }
            | Self::Clear
            | Self::Schedule
            | Self::ConfirmSchedule
            | Self::Unconfirm
            | Self::Penalize { .. }
            | Self::Reward { .. }
            | Self::Points { .. }
            | Self::ApproveSwap { .. }
            | Self::DutySettings { .. } => RequiredRole::Admin,
            Self::BlockDate { .. }
            | Self::RemoveBlock
            | Self::ViewBlock
            | Self::View
            | Self::RequestSwap { .. }
            | Self::AcceptSwap { .. } => RequiredRole::Personnel,
            Self::List
            | Self::Find { .. }
            | Self::Sort
            | Self::ViewRoster { .. }
            | Self::Swaps
            | Self::RejectSwap { .. }
            | Self::Undo
            | Self::Redo
            | Self::History => RequiredRole::Any,
        }
    }
}
