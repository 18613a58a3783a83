// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::database::PersonnelDatabase;
use duty_planner_audit::AuditEvent;

/// A hint to the user interface about what to show after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiInteraction {
    /// Redraw the duty calendar.
    RefreshCalendar,
    /// Show the personnel list.
    PeopleList,
    /// The scheduler settings changed and should be stored.
    SettingsChanged,
    /// The session must end.
    Exit,
}

/// What a command reports back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Message for the user.
    pub feedback: String,
    /// Optional hint for the user interface.
    pub interaction: Option<UiInteraction>,
    /// True if the live dataset changed and must be saved.
    pub modified: bool,
}

impl CommandResult {
    /// A result for a command that changed nothing.
    #[must_use]
    pub const fn query(feedback: String) -> Self {
        Self {
            feedback,
            interaction: None,
            modified: false,
        }
    }

    #[must_use]
    pub const fn with_interaction(mut self, interaction: UiInteraction) -> Self {
        self.interaction = Some(interaction);
        self
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new dataset after the transition.
    pub new_state: PersonnelDatabase,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// What to report to the caller.
    pub result: CommandResult,
}

/// What applying a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The command changed the dataset; the new state must be committed.
    Transition(Box<TransitionResult>),
    /// The command only read the dataset.
    Query(CommandResult),
}
