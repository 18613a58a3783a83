// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, PersonEdit, RequiredRole, RosterMonth};
use crate::database::PersonnelDatabase;
use crate::error::CoreError;
use crate::state::{ApplyOutcome, CommandResult, TransitionResult, UiInteraction};
use duty_planner_audit::{Action, Actor, AuditEvent, StateSnapshot};
use duty_planner_domain::{
    DomainError, DutyMonth, DutySettings, Nric, Person, ScheduleOutcome, SwapRequest,
    validate_points,
};
use std::collections::BTreeSet;
use std::fmt::Write as _;

const MESSAGE_RUN_SCHEDULE_AGAIN: &str = "Schedule unconfirmed! Please run <schedule> again.";

/// Applies a command to the dataset, producing a new dataset and audit event.
///
/// The input dataset is never modified: a changing command works on a copy
/// and returns it in [`ApplyOutcome::Transition`]; a read-only command
/// returns [`ApplyOutcome::Query`]. Authorization by role is checked by
/// [`execute`](crate::execute); per-object rules (e.g. who may accept a swap)
/// are checked here.
///
/// # Arguments
///
/// * `state` - The live dataset (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor running the command
/// * `settings` - Scheduler settings
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules
/// - An index does not name a person or swap request
/// - The command is `Undo` or `Redo`, which need the version history
/// - The command is `History` or `DutySettings`, which need a session
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &PersonnelDatabase,
    command: Command,
    actor: &Actor,
    settings: &DutySettings,
) -> Result<ApplyOutcome, CoreError> {
    let name: &'static str = command.name();
    match command {
        Command::AddPerson { person } => {
            let mut new_state: PersonnelDatabase = state.clone();
            let added: String = person.to_string();
            new_state.add_person(person)?;
            let mut feedback: String = format!("New person added: {added}");
            let note: &str = invalidate_next_month(&mut new_state)?;
            if !note.is_empty() {
                feedback.push('\n');
                feedback.push_str(note);
            }

            let result: CommandResult =
                changed(feedback).with_interaction(UiInteraction::PeopleList);
            Ok(transition(state, new_state, actor, name, added, result))
        }
        Command::EditPerson { index, edit } => {
            let person: &Person = state.person_at(index)?;
            let edited: Person = edited_person(&edit, person)?;
            let mut new_state: PersonnelDatabase = state.clone();
            new_state.replace_person(index - 1, edited.clone())?;

            let result: CommandResult = changed(format!("Edited Person: {edited}"))
                .with_interaction(UiInteraction::PeopleList);
            let details: String = format!("{} -> {}", person.nric, edited.nric);
            Ok(transition(state, new_state, actor, name, details, result))
        }
        Command::DeletePerson { index } => {
            let person: Person = state.person_at(index)?.clone();
            let mut new_state: PersonnelDatabase = state.clone();
            new_state.remove_person(&person.nric)?;
            invalidate_next_month(&mut new_state)?;

            let interaction: UiInteraction = if actor.is(&person.nric) {
                UiInteraction::Exit
            } else {
                UiInteraction::PeopleList
            };
            let result: CommandResult = changed(format!(
                "Deleted Person: {person}\nPlease run \"schedule\" again."
            ))
            .with_interaction(interaction);
            Ok(transition(state, new_state, actor, name, person.nric.to_string(), result))
        }
        Command::Clear => {
            let new_state: PersonnelDatabase = state.cleared()?;
            let result: CommandResult =
                changed(String::from("Personnel database has been cleared!"))
                    .with_interaction(UiInteraction::PeopleList);
            let details: String = format!("{} persons removed", state.persons().len());
            Ok(transition(state, new_state, actor, name, details, result))
        }
        Command::List => {
            let mut feedback: String = String::from("Listed all persons");
            for (i, person) in state.persons().iter().enumerate() {
                let _ = write!(feedback, "\n{}. {person}", i + 1);
            }
            Ok(ApplyOutcome::Query(
                CommandResult::query(feedback).with_interaction(UiInteraction::PeopleList),
            ))
        }
        Command::Find { keywords } => {
            let keywords: Vec<String> = keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if keywords.is_empty() {
                return Err(CoreError::DomainViolation(DomainError::InvalidField {
                    field: "keywords",
                    reason: String::from("at least one keyword is required"),
                }));
            }
            let mut feedback: String = String::new();
            let mut found: usize = 0;
            for (i, person) in state.persons().iter().enumerate() {
                if name_matches(&person.name, &keywords) {
                    let _ = write!(feedback, "\n{}. {person}", i + 1);
                    found += 1;
                }
            }
            let feedback: String = format!("{found} persons listed!{feedback}");
            Ok(ApplyOutcome::Query(
                CommandResult::query(feedback).with_interaction(UiInteraction::PeopleList),
            ))
        }
        Command::Sort => {
            let mut new_state: PersonnelDatabase = state.clone();
            if !new_state.sort_persons() {
                return Ok(ApplyOutcome::Query(
                    CommandResult::query(String::from("Persons are already sorted by name"))
                        .with_interaction(UiInteraction::PeopleList),
                ));
            }
            let result: CommandResult = changed(String::from("Sorted all persons by name"))
                .with_interaction(UiInteraction::PeopleList);
            let details: String = format!("{} persons", state.persons().len());
            Ok(transition(state, new_state, actor, name, details, result))
        }
        Command::Schedule => {
            let persons: Vec<Person> = state.persons().to_vec();
            let mut new_state: PersonnelDatabase = state.clone();
            let outcome: ScheduleOutcome = new_state
                .calendar_mut()
                .schedule_next_month(&persons, settings)?;
            let month: String = month_label(new_state.calendar().next())?;

            let result: CommandResult = changed(format!(
                "Duties for {month} have been scheduled ({} assignments)",
                outcome.assignments.len()
            ))
            .with_interaction(UiInteraction::RefreshCalendar);
            Ok(transition(state, new_state, actor, name, month, result))
        }
        Command::ConfirmSchedule => {
            let month: String = month_label(state.calendar().next())?;
            if state.calendar().next().is_confirmed() {
                return Ok(ApplyOutcome::Query(CommandResult::query(format!(
                    "Schedule for {month} is already confirmed"
                ))));
            }
            let mut new_state: PersonnelDatabase = state.clone();
            new_state.calendar_mut().confirm_next_month()?;

            let result: CommandResult = changed(format!("Schedule for {month} confirmed!"))
                .with_interaction(UiInteraction::RefreshCalendar);
            Ok(transition(state, new_state, actor, name, month, result))
        }
        Command::Unconfirm => {
            let month: String = month_label(state.calendar().next())?;
            if !state.calendar().next().is_confirmed() {
                return Ok(ApplyOutcome::Query(CommandResult::query(format!(
                    "Schedule for {month} is not confirmed"
                ))));
            }
            let mut new_state: PersonnelDatabase = state.clone();
            new_state.calendar_mut().unconfirm_next_month();

            let result: CommandResult = changed(format!("Schedule for {month} unconfirmed!"))
                .with_interaction(UiInteraction::RefreshCalendar);
            Ok(transition(state, new_state, actor, name, month, result))
        }
        Command::BlockDate { days } => {
            let nric: Nric = actor_person(state, actor, name)?.nric.clone();
            if days.is_empty() {
                return Err(CoreError::DomainViolation(DomainError::InvalidField {
                    field: "days",
                    reason: String::from("at least one day is required"),
                }));
            }
            let mut new_state: PersonnelDatabase = state.clone();
            new_state.calendar_mut().next_mut().block_dates(&nric, &days)?;
            let next: &DutyMonth = new_state.calendar().next();
            let month: String = month_label(next)?;
            let blocked: String = join_days(&next.blocked_days_of(&nric));

            let result: CommandResult =
                changed(format!("Blocked dates for {month}: {blocked}"));
            Ok(transition(state, new_state, actor, name, blocked, result))
        }
        Command::RemoveBlock => {
            let nric: Nric = actor_person(state, actor, name)?.nric.clone();
            let month: String = month_label(state.calendar().next())?;
            if state.calendar().next().blocked_days_of(&nric).is_empty() {
                return Ok(ApplyOutcome::Query(CommandResult::query(format!(
                    "You have no blocked dates for {month}"
                ))));
            }
            let mut new_state: PersonnelDatabase = state.clone();
            new_state.calendar_mut().next_mut().clear_blocked_dates(&nric);

            let result: CommandResult = changed(format!("Blocked dates for {month} removed"));
            Ok(transition(state, new_state, actor, name, month, result))
        }
        Command::ViewBlock => {
            let nric: &Nric = &actor_person(state, actor, name)?.nric;
            let days: Vec<u8> = state.calendar().next().blocked_days_of(nric);
            let feedback: String = if days.is_empty() {
                String::from("You have no blocked dates for next month")
            } else {
                format!(
                    "Below are the blocked dates for next month: {}",
                    join_days(&days)
                )
            };
            Ok(ApplyOutcome::Query(CommandResult::query(feedback)))
        }
        Command::Penalize { points, indices } | Command::Reward { points, indices } => {
            let is_reward: bool = name == "Reward";
            validate_points(points)?;
            let targets: Vec<Person> = persons_at(state, &indices)?;
            let mut new_state: PersonnelDatabase = state.clone();
            for person in &targets {
                if is_reward {
                    new_state.calendar_mut().ledger_mut().reward(&person.nric, points)?;
                } else {
                    new_state.calendar_mut().ledger_mut().penalize(&person.nric, points)?;
                }
            }

            let labels: String = targets
                .iter()
                .map(Person::label)
                .collect::<Vec<String>>()
                .join(", ");
            let feedback: String = if is_reward {
                format!("Successfully rewarded {points} points to {labels}")
            } else {
                format!("Successfully penalized {points} points from {labels}")
            };
            let details: String = format!("{points} points: {labels}");
            Ok(transition(state, new_state, actor, name, details, changed(feedback)))
        }
        Command::Points { index } => {
            let feedback: String = match index {
                None => state.calendar().ledger().print_points(state.persons()),
                Some(index) => state
                    .calendar()
                    .ledger()
                    .print_details(state.person_at(index)?),
            };
            Ok(ApplyOutcome::Query(CommandResult::query(feedback)))
        }
        Command::View => {
            let nric: &Nric = &actor_person(state, actor, name)?.nric;
            let feedback: String = view_duties(state, nric)?;
            Ok(ApplyOutcome::Query(CommandResult::query(feedback)))
        }
        Command::ViewRoster { month } => {
            let roster: &DutyMonth = match month {
                RosterMonth::Current => state.calendar().current(),
                RosterMonth::Next => state.calendar().next(),
            };
            let feedback: String = view_roster(state, roster)?;
            Ok(ApplyOutcome::Query(CommandResult::query(feedback)))
        }
        Command::RequestSwap {
            month,
            day,
            counterpart,
            counterpart_day,
        } => {
            let requester: Nric = actor_person(state, actor, name)?.nric.clone();
            let counterpart: Nric = state.person_at(counterpart)?.nric.clone();
            let roster: &DutyMonth = match month {
                RosterMonth::Current => state.calendar().current(),
                RosterMonth::Next => state.calendar().next(),
            };
            ensure_on_duty(roster, &requester, day)?;
            ensure_on_duty(roster, &counterpart, counterpart_day)?;

            let request: SwapRequest =
                SwapRequest::new(requester, roster.year_month(), day, counterpart, counterpart_day);
            let summary: String = request.to_string();
            let mut new_state: PersonnelDatabase = state.clone();
            let position: usize = new_state.swaps_mut().submit(request)?;

            let result: CommandResult =
                changed(format!("Swap request {} created: {summary}", position + 1));
            Ok(transition(state, new_state, actor, name, summary, result))
        }
        Command::Swaps => {
            let mut feedback: String = String::from("Swap requests:");
            let mut shown: usize = 0;
            for (i, request) in state.swaps().requests().iter().enumerate() {
                let visible: bool = actor.is_admin()
                    || actor.nric.as_ref().is_some_and(|nric| request.involves(nric));
                if visible {
                    let _ = write!(feedback, "\n{}. {request}", i + 1);
                    shown += 1;
                }
            }
            if shown == 0 {
                feedback = String::from("No swap requests");
            }
            Ok(ApplyOutcome::Query(CommandResult::query(feedback)))
        }
        Command::AcceptSwap { index } => {
            let position: usize = swap_position(index)?;
            let mut new_state: PersonnelDatabase = state.clone();
            new_state
                .swaps_mut()
                .get_mut(position)?
                .accept(actor.nric.as_ref())?;

            let result: CommandResult = changed(format!(
                "Swap request {index} accepted; awaiting admin approval"
            ));
            Ok(transition(state, new_state, actor, name, index.to_string(), result))
        }
        Command::ApproveSwap { index } => {
            let position: usize = swap_position(index)?;
            let mut new_state: PersonnelDatabase = state.clone();
            let summary: String = new_state
                .approve_swap(position, actor.role, settings.min_rest_days)?.to_string();

            let result: CommandResult =
                changed(format!("Swap request {index} approved: {summary}"))
                    .with_interaction(UiInteraction::RefreshCalendar);
            Ok(transition(state, new_state, actor, name, summary, result))
        }
        Command::RejectSwap { index } => {
            let position: usize = swap_position(index)?;
            let mut new_state: PersonnelDatabase = state.clone();
            new_state
                .swaps_mut()
                .get_mut(position)?
                .reject(actor.nric.as_ref(), actor.role)?;

            let result: CommandResult = changed(format!("Swap request {index} rejected"));
            Ok(transition(state, new_state, actor, name, index.to_string(), result))
        }
        Command::Undo => Err(CoreError::UndoUnavailable),
        Command::Redo => Err(CoreError::RedoUnavailable),
        Command::History | Command::DutySettings { .. } => Err(CoreError::SessionCommand(name)),
    }
}

const fn changed(feedback: String) -> CommandResult {
    CommandResult {
        feedback,
        interaction: None,
        modified: true,
    }
}

fn transition(
    before: &PersonnelDatabase,
    new_state: PersonnelDatabase,
    actor: &Actor,
    name: &str,
    details: String,
    result: CommandResult,
) -> ApplyOutcome {
    let before: StateSnapshot = before.to_snapshot();
    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(String::from(name), Some(details));
    let audit_event: AuditEvent = AuditEvent::new(actor.clone(), action, before, after);
    ApplyOutcome::Transition(Box::new(TransitionResult {
        new_state,
        audit_event,
        result,
    }))
}

/// Clears the next month after the registry changed and returns the note
/// to append to the feedback.
fn invalidate_next_month(state: &mut PersonnelDatabase) -> Result<&'static str, CoreError> {
    let had_schedule: bool = state
        .calendar()
        .next()
        .scheduled_duties()
        .iter()
        .any(|d| !d.persons().is_empty());
    let was_confirmed: bool = state.calendar_mut().invalidate_next_month()?;
    Ok(if was_confirmed {
        MESSAGE_RUN_SCHEDULE_AGAIN
    } else if had_schedule {
        "Please run <schedule> again."
    } else {
        ""
    })
}

/// Whole words of the name, compared case-insensitively.
fn name_matches(name: &str, keywords: &[String]) -> bool {
    name.split_whitespace()
        .map(str::to_lowercase)
        .any(|word| keywords.contains(&word))
}

fn edited_person(edit: &PersonEdit, person: &Person) -> Result<Person, CoreError> {
    if edit.is_empty() {
        return Err(CoreError::DomainViolation(DomainError::InvalidField {
            field: "edit",
            reason: String::from("at least one field must be provided"),
        }));
    }
    Ok(edit.apply_to(person))
}

/// Returns the registered person the actor runs as.
fn actor_person<'a>(
    state: &'a PersonnelDatabase,
    actor: &Actor,
    command: &'static str,
) -> Result<&'a Person, CoreError> {
    let Some(nric) = &actor.nric else {
        return Err(CoreError::AuthorizationDenied {
            command,
            required: RequiredRole::Personnel,
        });
    };
    state
        .find_person(nric)
        .ok_or_else(|| CoreError::DomainViolation(DomainError::PersonNotFound(nric.clone())))
}

/// Resolves one-based indices, ignoring repeats. Every index must be valid.
fn persons_at(state: &PersonnelDatabase, indices: &[usize]) -> Result<Vec<Person>, CoreError> {
    if indices.is_empty() {
        return Err(CoreError::InvalidIndex(0));
    }
    let unique: BTreeSet<usize> = indices.iter().copied().collect();
    unique
        .into_iter()
        .map(|index| state.person_at(index).cloned())
        .collect()
}

const fn swap_position(index: usize) -> Result<usize, CoreError> {
    match index.checked_sub(1) {
        Some(position) => Ok(position),
        None => Err(CoreError::InvalidIndex(index)),
    }
}

fn ensure_on_duty(roster: &DutyMonth, nric: &Nric, day: u8) -> Result<(), DomainError> {
    match roster.duty(day) {
        Some(duty) if duty.contains(nric) => Ok(()),
        Some(_) => Err(DomainError::DutyNotFound {
            nric: nric.clone(),
            day,
        }),
        None => Err(DomainError::InvalidDay {
            day,
            days_in_month: roster.days_in_month(),
        }),
    }
}

fn month_label(month: &DutyMonth) -> Result<String, DomainError> {
    Ok(format!("{} {}", month.year_month().name()?, month.year()))
}

fn join_days(days: &[u8]) -> String {
    days.iter()
        .map(u8::to_string)
        .collect::<Vec<String>>()
        .join(", ")
}

fn view_duties(state: &PersonnelDatabase, nric: &Nric) -> Result<String, DomainError> {
    let mut feedback: String = format!("Viewing {nric}'s duties!");
    let mut count: usize = 0;
    for month in [state.calendar().current(), state.calendar().next()] {
        let label: String = month_label(month)?;
        for duty in month.duties_of(nric) {
            count += 1;
            let _ = write!(
                feedback,
                "\nDuty {count}: Month: {label}, Day: {} with {}",
                duty.day(),
                duty.persons_string(nric)
            );
        }
    }
    if count == 0 {
        return Ok(format!("{nric} has no duties!"));
    }
    Ok(feedback)
}

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn view_roster(state: &PersonnelDatabase, roster: &DutyMonth) -> Result<String, DomainError> {
    let status: &str = if roster.is_confirmed() {
        "confirmed"
    } else {
        "unconfirmed"
    };
    let mut feedback: String = format!("Duties for {} ({status}):", month_label(roster)?);
    for duty in roster.scheduled_duties() {
        let weekday: &str =
            WEEKDAYS[(usize::from(roster.first_day_offset()) + usize::from(duty.day()) - 1) % 7];
        let on_duty: String = if duty.persons().is_empty() {
            String::from("-")
        } else {
            duty.persons()
                .iter()
                .map(|nric| {
                    state
                        .find_person(nric)
                        .map_or_else(|| nric.to_string(), Person::label)
                })
                .collect::<Vec<String>>()
                .join(", ")
        };
        let _ = write!(feedback, "\n{:02} {weekday}: {on_duty}", duty.day());
    }
    Ok(feedback)
}
