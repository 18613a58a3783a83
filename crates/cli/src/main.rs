// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod cli;
mod session;

#[cfg(test)]
mod tests;

use clap::Parser;
use cli::{Cli, CliCommand};
use duty_planner::DutyPlanner;
use duty_planner_audit::Actor;
use duty_planner_domain::DutySettings;
use duty_planner_persistence::{JsonFileStorage, UserPrefs};
use session::Outcome;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use time::OffsetDateTime;
use tracing::info;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args: Cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut prefs: UserPrefs = UserPrefs::load_or_default(&args.prefs)?;
    let data_path: PathBuf = args
        .data
        .clone()
        .unwrap_or_else(|| prefs.data_file_path.clone());
    let settings: DutySettings = args.settings(prefs.duty_settings);
    info!(data = %data_path.display(), ?settings, "Starting duty planner");

    let today: time::Date = OffsetDateTime::now_utc().date();
    let mut planner: DutyPlanner<JsonFileStorage> =
        DutyPlanner::load(JsonFileStorage::new(data_path), settings, today)?;
    session::log_changes(&mut planner);

    let actor: Actor = session::resolve_actor(planner.dataset().live(), args.actor.as_deref())?;
    info!(actor = %actor, "Running as");

    let mut stdout: io::Stdout = io::stdout();
    let code: ExitCode = match args.command {
        CliCommand::Run(command) => {
            match session::run_command(&mut planner, command, &actor, &mut stdout)? {
                Outcome::Done(_) => ExitCode::SUCCESS,
                Outcome::Failed => ExitCode::FAILURE,
            }
        }
        CliCommand::Shell => {
            session::run_shell(&mut planner, &actor, io::stdin().lock(), &mut stdout)?;
            ExitCode::SUCCESS
        }
    };

    if *planner.settings() != settings {
        prefs.duty_settings =
            session::settings_to_store(prefs.duty_settings, settings, *planner.settings());
        prefs.save(&args.prefs)?;
        info!(settings = %prefs.duty_settings, "Saved duty settings");
    }
    Ok(code)
}
