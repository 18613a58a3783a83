// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line arguments and their mapping to planner commands.

use clap::{Args, Parser, Subcommand, ValueEnum};
use duty_planner::{Command, PersonEdit, RosterMonth};
use duty_planner_domain::{DutySettings, Nric, Person, Role};
use std::path::PathBuf;

/// Duty Planner - rosters, duty points and duty swaps for a unit
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the preferences file
    #[arg(long, default_value = "preferences.json")]
    pub prefs: PathBuf,

    /// Path to the personnel data file, overriding the preferences
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Personnel required per day, overriding the preferences
    #[arg(long)]
    pub headcount: Option<u8>,

    /// Free days required between two duties of one person
    #[arg(long)]
    pub rest_days: Option<u8>,

    /// Points credited per duty served
    #[arg(long)]
    pub points: Option<i64>,

    /// NRIC of the person running the command; the admin account if absent
    #[arg(long = "as", value_name = "NRIC")]
    pub actor: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

impl Cli {
    /// Applies the command-line overrides to stored settings.
    #[must_use]
    pub fn settings(&self, stored: DutySettings) -> DutySettings {
        DutySettings {
            headcount_per_day: self.headcount.unwrap_or(stored.headcount_per_day),
            min_rest_days: self.rest_days.unwrap_or(stored.min_rest_days),
            points_per_duty: self.points.unwrap_or(stored.points_per_duty),
        }
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Run one planner command
    #[command(flatten)]
    Run(PlannerCommand),
    /// Read planner commands from standard input, one per line
    Shell,
}

/// A line typed at the shell prompt.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: PlannerCommand,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleArg {
    Admin,
    General,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Self::Admin,
            RoleArg::General => Self::General,
        }
    }
}

/// Fields of a new person.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PersonArgs {
    #[arg(long)]
    pub nric: String,
    #[arg(long)]
    pub company: String,
    #[arg(long)]
    pub section: String,
    #[arg(long)]
    pub rank: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long, value_enum, default_value = "general")]
    pub role: RoleArg,
}

/// Fields to change on an existing person.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EditArgs {
    /// Position of the person, as shown by `list`
    pub index: usize,
    #[arg(long)]
    pub nric: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub section: Option<String>,
    #[arg(long)]
    pub rank: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long, value_enum)]
    pub role: Option<RoleArg>,
}

/// Planner commands, one per dataset operation.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PlannerCommand {
    /// Register a new person
    Add(PersonArgs),
    /// Change fields of a person
    Edit(EditArgs),
    /// Remove a person
    Delete { index: usize },
    /// Remove every person and start an empty calendar
    Clear,
    /// List every person
    List,
    /// List persons whose name contains any of the words
    Find {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
    /// Sort the registry by name
    Sort,
    /// Schedule next month's duties
    Schedule,
    /// Confirm next month's schedule
    Confirm,
    /// Unconfirm next month's schedule
    Unconfirm,
    /// Block days of next month
    Block {
        #[arg(required = true)]
        days: Vec<u8>,
    },
    /// Remove all your blocked days of next month
    RemoveBlock,
    /// Show your blocked days of next month
    ViewBlock,
    /// Deduct points from persons
    Penalize {
        points: i64,
        #[arg(required = true)]
        indices: Vec<usize>,
    },
    /// Grant points to persons
    Reward {
        points: i64,
        #[arg(required = true)]
        indices: Vec<usize>,
    },
    /// Show every point total, or one person's history
    Points { index: Option<usize> },
    /// Show your duties
    View,
    /// Show this month's roster day by day
    ViewCurrent,
    /// Show next month's roster day by day
    ViewNext,
    /// Offer one of your duties for another person's duty
    RequestSwap {
        /// The duty is in the current month instead of next month
        #[arg(long)]
        current: bool,
        /// Your duty day
        day: u8,
        /// Position of the other person, as shown by `list`
        counterpart: usize,
        /// The other person's duty day
        counterpart_day: u8,
    },
    /// List swap requests
    Swaps,
    /// Accept a swap request offered to you
    AcceptSwap { index: usize },
    /// Approve an accepted swap request
    ApproveSwap { index: usize },
    /// Reject a swap request
    RejectSwap { index: usize },
    /// Undo the last change
    Undo,
    /// Redo the last undone change
    Redo,
    /// List the changes made so far, most recent first
    History,
    /// Show or change the scheduler settings
    DutySettings {
        /// Personnel required per day
        #[arg(long)]
        headcount: Option<u8>,
        /// Free days required between two duties of one person
        #[arg(long)]
        rest_days: Option<u8>,
        /// Points credited per duty served
        #[arg(long)]
        points: Option<i64>,
    },
}

impl PlannerCommand {
    /// Converts the parsed arguments into a planner command.
    #[must_use]
    pub fn into_command(self) -> Command {
        match self {
            Self::Add(args) => Command::AddPerson {
                person: Person::new(
                    Nric::new(&args.nric),
                    args.company,
                    args.section,
                    args.rank,
                    args.name,
                    args.phone,
                    args.role.into(),
                ),
            },
            Self::Edit(args) => Command::EditPerson {
                index: args.index,
                edit: PersonEdit {
                    nric: args.nric.as_deref().map(Nric::new),
                    company: args.company,
                    section: args.section,
                    rank: args.rank,
                    name: args.name,
                    phone: args.phone,
                    role: args.role.map(Role::from),
                },
            },
            Self::Delete { index } => Command::DeletePerson { index },
            Self::Clear => Command::Clear,
            Self::List => Command::List,
            Self::Find { keywords } => Command::Find { keywords },
            Self::Sort => Command::Sort,
            Self::Schedule => Command::Schedule,
            Self::Confirm => Command::ConfirmSchedule,
            Self::Unconfirm => Command::Unconfirm,
            Self::Block { days } => Command::BlockDate { days },
            Self::RemoveBlock => Command::RemoveBlock,
            Self::ViewBlock => Command::ViewBlock,
            Self::Penalize { points, indices } => Command::Penalize { points, indices },
            Self::Reward { points, indices } => Command::Reward { points, indices },
            Self::Points { index } => Command::Points { index },
            Self::View => Command::View,
            Self::ViewCurrent => Command::ViewRoster {
                month: RosterMonth::Current,
            },
            Self::ViewNext => Command::ViewRoster {
                month: RosterMonth::Next,
            },
            Self::RequestSwap {
                current,
                day,
                counterpart,
                counterpart_day,
            } => Command::RequestSwap {
                month: if current {
                    RosterMonth::Current
                } else {
                    RosterMonth::Next
                },
                day,
                counterpart,
                counterpart_day,
            },
            Self::Swaps => Command::Swaps,
            Self::AcceptSwap { index } => Command::AcceptSwap { index },
            Self::ApproveSwap { index } => Command::ApproveSwap { index },
            Self::RejectSwap { index } => Command::RejectSwap { index },
            Self::Undo => Command::Undo,
            Self::Redo => Command::Redo,
            Self::History => Command::History,
            Self::DutySettings {
                headcount,
                rest_days,
                points,
            } => Command::DutySettings {
                headcount,
                rest_days,
                points,
            },
        }
    }
}
