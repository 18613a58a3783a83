// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Running commands against a loaded planner.

use crate::cli::{PlannerCommand, ShellLine};
use clap::Parser;
use duty_planner::{
    ChangeNotice, CommandResult, DutyPlanner, PersonnelDatabase, PersonnelStorage, UiInteraction,
};
use duty_planner_audit::Actor;
use duty_planner_domain::{DomainError, DutySettings, Nric, Person};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Resolves who is running commands.
///
/// Without an NRIC the built-in admin account is used. Otherwise the
/// person must be registered and acts with their own role.
///
/// # Errors
///
/// Returns an error if the NRIC is malformed or not registered.
pub fn resolve_actor(
    database: &PersonnelDatabase,
    nric: Option<&str>,
) -> Result<Actor, DomainError> {
    let Some(value) = nric else {
        return Ok(Actor::admin());
    };
    let nric: Nric = Nric::parse(value)?;
    let person: &Person = database
        .find_person(&nric)
        .ok_or_else(|| DomainError::PersonNotFound(nric.clone()))?;
    Ok(Actor::new(Some(nric), person.role))
}

/// Logs every change notice of the planner's dataset.
pub fn log_changes<S: PersonnelStorage>(planner: &mut DutyPlanner<S>) {
    planner
        .dataset_mut()
        .subscribe(|notice: &ChangeNotice| match notice {
            ChangeNotice::Committed { version, event } => {
                debug!(version, event = %event, "Dataset changed");
            }
            ChangeNotice::Undone { version } | ChangeNotice::Redone { version } => {
                debug!(version, "Dataset moved in history");
            }
            ChangeNotice::Reset => debug!("Dataset reset"),
        });
}

/// Returns the settings to store after a session.
///
/// Fields changed during the session replace the stored ones. Fields only
/// overridden on the command line keep their stored value.
#[must_use]
pub fn settings_to_store(
    stored: DutySettings,
    started: DutySettings,
    now: DutySettings,
) -> DutySettings {
    DutySettings {
        headcount_per_day: if now.headcount_per_day == started.headcount_per_day {
            stored.headcount_per_day
        } else {
            now.headcount_per_day
        },
        min_rest_days: if now.min_rest_days == started.min_rest_days {
            stored.min_rest_days
        } else {
            now.min_rest_days
        },
        points_per_duty: if now.points_per_duty == started.points_per_duty {
            stored.points_per_duty
        } else {
            now.points_per_duty
        },
    }
}

/// How a command run at the front end ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command succeeded, with an optional UI hint.
    Done(Option<UiInteraction>),
    /// The command was rejected or failed.
    Failed,
}

/// Runs one command and writes its feedback or error to `out`.
///
/// # Errors
///
/// Returns an error only if `out` cannot be written.
pub fn run_command<S: PersonnelStorage, W: Write>(
    planner: &mut DutyPlanner<S>,
    command: PlannerCommand,
    actor: &Actor,
    out: &mut W,
) -> io::Result<Outcome> {
    match planner.execute(command.into_command(), actor) {
        Ok(CommandResult {
            feedback,
            interaction,
            ..
        }) => {
            writeln!(out, "{feedback}")?;
            Ok(Outcome::Done(interaction))
        }
        Err(err) => {
            writeln!(out, "{err}")?;
            Ok(Outcome::Failed)
        }
    }
}

/// Reads commands from `input` until end of input, `exit`, or a command
/// that ends the session.
///
/// # Errors
///
/// Returns an error if `input` cannot be read or `out` cannot be written.
pub fn run_shell<S: PersonnelStorage, R: BufRead, W: Write>(
    planner: &mut DutyPlanner<S>,
    actor: &Actor,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    for line in input.lines() {
        let line: String = line?;
        let Some(words) = split_line(&line) else {
            writeln!(out, "Unterminated quote")?;
            continue;
        };
        match words.first().map(String::as_str) {
            None => continue,
            Some("exit" | "quit") => break,
            Some(_) => {}
        }
        let parsed: ShellLine = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(err) => {
                write!(out, "{}", err.render())?;
                continue;
            }
        };
        let outcome: Outcome = run_command(planner, parsed.command, actor, out)?;
        if outcome == Outcome::Done(Some(UiInteraction::Exit)) {
            break;
        }
    }
    Ok(())
}

/// Splits a shell line into words. Double quotes group words.
///
/// Returns `None` if a quote is left open.
#[must_use]
pub fn split_line(line: &str) -> Option<Vec<String>> {
    let mut words: Vec<String> = Vec::new();
    let mut word: String = String::new();
    let mut in_word: bool = false;
    let mut quoted: bool = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            c => {
                word.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return None;
    }
    if in_word {
        words.push(word);
    }
    Some(words)
}
