// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::apply::apply;
use crate::command::{Command, RequiredRole};
use crate::error::CoreError;
use crate::state::{ApplyOutcome, CommandResult, TransitionResult, UiInteraction};
use crate::versioned::VersionedPersonnelDatabase;
use duty_planner_audit::{Actor, AuditEvent};
use duty_planner_domain::DutySettings;
use std::fmt::Write as _;
use tracing::{info, warn};

/// Checks that the actor holds the role the command requires.
///
/// # Errors
///
/// Returns `CoreError::AuthorizationDenied` naming the command and the
/// required role.
pub fn authorize(command: &Command, actor: &Actor) -> Result<(), CoreError> {
    let required: RequiredRole = command.required_role();
    if required.permits(actor) {
        Ok(())
    } else {
        Err(CoreError::AuthorizationDenied {
            command: command.name(),
            required,
        })
    }
}

/// Runs one command against the versioned dataset.
///
/// The actor's role is checked before anything else. A command that
/// changes the dataset is committed exactly once; a failed command commits
/// nothing and leaves the live dataset as it was.
///
/// `Undo`, `Redo` and `History` act on the version history, and
/// `DutySettings` replaces `settings`.
///
/// # Arguments
///
/// * `command` - The command to run
/// * `actor` - The actor running the command
/// * `dataset` - The versioned dataset
/// * `settings` - Scheduler settings of the session
///
/// # Errors
///
/// Returns an error if the actor is not authorized, or the command is
/// rejected by [`apply`] or by the version history.
pub fn execute(
    command: Command,
    actor: &Actor,
    dataset: &mut VersionedPersonnelDatabase,
    settings: &mut DutySettings,
) -> Result<CommandResult, CoreError> {
    let name: &'static str = command.name();
    let result: Result<CommandResult, CoreError> = run(command, actor, dataset, settings);
    if let Err(err) = &result {
        warn!(command = name, actor = %actor, error = %err, "Command rejected");
    }
    result
}

fn run(
    command: Command,
    actor: &Actor,
    dataset: &mut VersionedPersonnelDatabase,
    settings: &mut DutySettings,
) -> Result<CommandResult, CoreError> {
    authorize(&command, actor)?;
    match command {
        Command::Undo => {
            dataset.undo()?;
            Ok(history_moved("Undo success!"))
        }
        Command::Redo => {
            dataset.redo()?;
            Ok(history_moved("Redo success!"))
        }
        Command::History => Ok(CommandResult::query(list_history(dataset.history()))),
        Command::DutySettings {
            headcount,
            rest_days,
            points,
        } => {
            let updated: DutySettings = DutySettings::new(
                headcount.unwrap_or(settings.headcount_per_day),
                rest_days.unwrap_or(settings.min_rest_days),
                points.unwrap_or(settings.points_per_duty),
            )?;
            if updated == *settings {
                return Ok(CommandResult::query(format!("Duty settings: {settings}")));
            }
            *settings = updated;
            info!(settings = %updated, "Duty settings changed");
            Ok(CommandResult::query(format!("Duty settings updated: {updated}"))
                .with_interaction(UiInteraction::SettingsChanged))
        }
        command => match apply(dataset.live(), command, actor, settings)? {
            ApplyOutcome::Transition(transition) => {
                let TransitionResult {
                    new_state,
                    audit_event,
                    result,
                } = *transition;
                dataset.commit(new_state, audit_event);
                Ok(result)
            }
            ApplyOutcome::Query(result) => Ok(result),
        },
    }
}

fn list_history(events: &[AuditEvent]) -> String {
    if events.is_empty() {
        return String::from("You have not yet entered any commands.");
    }
    let mut feedback: String = String::from("Entered commands (from most recent to earliest):");
    for (i, event) in events.iter().rev().enumerate() {
        let _ = write!(feedback, "\n{}. {event}", i + 1);
    }
    feedback
}

fn history_moved(feedback: &str) -> CommandResult {
    CommandResult {
        feedback: String::from(feedback),
        interaction: Some(UiInteraction::RefreshCalendar),
        modified: true,
    }
}
