// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    admin, create_database_with_persons, create_scheduled_dataset, create_test_database,
    create_test_person, general, nric, run, settings,
};
use crate::{
    ApplyOutcome, Command, CommandResult, CoreError, PersonEdit, PersonnelDatabase, RequiredRole,
    RosterMonth, UiInteraction, VersionedPersonnelDatabase, apply, execute,
};
use duty_planner_audit::Actor;
use duty_planner_domain::{
    DomainError, DutyMonth, DutySettings, EntryKind, Person, PointsLedger, Role,
};

// ============================================================================
// Authorization
// ============================================================================

fn admin_only_commands() -> Vec<Command> {
    vec![
        Command::AddPerson {
            person: create_test_person(9),
        },
        Command::EditPerson {
            index: 1,
            edit: PersonEdit::default(),
        },
        Command::DeletePerson { index: 1 },
        Command::Clear,
        Command::Schedule,
        Command::ConfirmSchedule,
        Command::Unconfirm,
        Command::Penalize {
            points: 1,
            indices: vec![1],
        },
        Command::Reward {
            points: 1,
            indices: vec![1],
        },
        Command::Points { index: None },
        Command::ApproveSwap { index: 1 },
        Command::DutySettings {
            headcount: Some(2),
            rest_days: None,
            points: None,
        },
    ]
}

fn personnel_only_commands() -> Vec<Command> {
    vec![
        Command::BlockDate { days: vec![1] },
        Command::RemoveBlock,
        Command::ViewBlock,
        Command::View,
        Command::RequestSwap {
            month: RosterMonth::Next,
            day: 1,
            counterpart: 2,
            counterpart_day: 2,
        },
        Command::AcceptSwap { index: 1 },
    ]
}

#[test]
fn test_general_user_cannot_run_admin_commands() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(3);
    let before: usize = dataset.version();

    for command in admin_only_commands() {
        let name: &'static str = command.name();
        assert_eq!(command.required_role(), RequiredRole::Admin);
        assert_eq!(
            run(&mut dataset, &general(1), command),
            Err(CoreError::AuthorizationDenied {
                command: name,
                required: RequiredRole::Admin,
            })
        );
    }
    assert_eq!(dataset.version(), before);
}

#[test]
fn test_admin_account_cannot_run_personnel_commands() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(3);
    let before: usize = dataset.version();

    for command in personnel_only_commands() {
        let name: &'static str = command.name();
        assert_eq!(command.required_role(), RequiredRole::Personnel);
        assert_eq!(
            run(&mut dataset, &admin(), command),
            Err(CoreError::AuthorizationDenied {
                command: name,
                required: RequiredRole::Personnel,
            })
        );
    }
    assert_eq!(dataset.version(), before);
}

#[test]
fn test_open_commands_are_open_to_everyone() {
    for command in [
        Command::List,
        Command::Swaps,
        Command::RejectSwap { index: 1 },
        Command::Undo,
        Command::Redo,
        Command::Find {
            keywords: vec![String::from("Person")],
        },
        Command::Sort,
        Command::ViewRoster {
            month: RosterMonth::Current,
        },
        Command::History,
    ] {
        assert_eq!(command.required_role(), RequiredRole::Any);
    }
}

#[test]
fn test_admin_person_may_run_both_kinds() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(3);
    let actor: Actor = Actor::new(Some(nric(1)), Role::Admin);

    assert!(run(&mut dataset, &actor, Command::Points { index: None }).is_ok());
    assert!(run(&mut dataset, &actor, Command::View).is_ok());
}

#[test]
fn test_unregistered_personnel_is_rejected() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(2);

    assert_eq!(
        run(&mut dataset, &general(9), Command::View),
        Err(CoreError::DomainViolation(DomainError::PersonNotFound(nric(9))))
    );
}

// ============================================================================
// Registry commands
// ============================================================================

#[test]
fn test_add_person_commits_once() {
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(create_test_database());

    let result: CommandResult = run(
        &mut dataset,
        &admin(),
        Command::AddPerson {
            person: create_test_person(1),
        },
    )
    .unwrap();

    assert!(result.modified);
    assert_eq!(result.interaction, Some(UiInteraction::PeopleList));
    assert!(result.feedback.starts_with("New person added: S0000001A"));
    assert_eq!(dataset.version(), 1);
    assert_eq!(dataset.live().persons().len(), 1);
}

#[test]
fn test_duplicate_add_commits_nothing() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(2);
    let before: usize = dataset.version();

    let result: Result<CommandResult, CoreError> = run(
        &mut dataset,
        &admin(),
        Command::AddPerson {
            person: create_test_person(1),
        },
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::DuplicatePerson(
            nric(1)
        )))
    );
    assert_eq!(dataset.version(), before);
}

#[test]
fn test_adding_person_reverts_only_last_schedule_batch() {
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(create_database_with_persons(3));
    run(
        &mut dataset,
        &admin(),
        Command::Reward {
            points: 5,
            indices: vec![1],
        },
    )
    .unwrap();
    run(
        &mut dataset,
        &admin(),
        Command::Penalize {
            points: 2,
            indices: vec![2],
        },
    )
    .unwrap();
    run(&mut dataset, &admin(), Command::Schedule).unwrap();

    let result: CommandResult = run(
        &mut dataset,
        &admin(),
        Command::AddPerson {
            person: create_test_person(4),
        },
    )
    .unwrap();

    let ledger: &PointsLedger = dataset.live().calendar().ledger();
    assert_eq!(ledger.total(&nric(1)), 5);
    assert_eq!(ledger.total(&nric(2)), -2);
    assert_eq!(ledger.total(&nric(3)), 0);
    assert!(
        ledger
            .history(&nric(1))
            .iter()
            .all(|e| e.kind != EntryKind::Duty)
    );
    assert_eq!(ledger.history(&nric(1)).len(), 1);
    assert!(
        dataset
            .live()
            .calendar()
            .next()
            .scheduled_duties()
            .iter()
            .all(|d| d.persons().is_empty())
    );
    assert!(result.feedback.ends_with("Please run <schedule> again."));
}

#[test]
fn test_adding_person_unconfirms_schedule() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(3);
    run(&mut dataset, &admin(), Command::ConfirmSchedule).unwrap();

    let result: CommandResult = run(
        &mut dataset,
        &admin(),
        Command::AddPerson {
            person: create_test_person(4),
        },
    )
    .unwrap();

    assert!(!dataset.live().calendar().next().is_confirmed());
    assert!(
        result
            .feedback
            .ends_with("Schedule unconfirmed! Please run <schedule> again.")
    );
}

#[test]
fn test_delete_person_cascades_and_invalidates() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(3);

    let result: CommandResult =
        run(&mut dataset, &admin(), Command::DeletePerson { index: 2 }).unwrap();

    assert!(!dataset.live().has_person(&nric(2)));
    assert!(dataset.live().calendar().ledger().row(&nric(2)).is_none());
    assert_eq!(dataset.live().calendar().ledger().total(&nric(1)), 0);
    assert_eq!(result.interaction, Some(UiInteraction::PeopleList));
    assert!(result.feedback.starts_with("Deleted Person: S0000002A"));
}

#[test]
fn test_deleting_self_ends_session() {
    let mut database: PersonnelDatabase = create_database_with_persons(0);
    let mut me: Person = create_test_person(1);
    me.role = Role::Admin;
    database.add_person(me).unwrap();
    let mut dataset: VersionedPersonnelDatabase = VersionedPersonnelDatabase::new(database);
    let actor: Actor = Actor::new(Some(nric(1)), Role::Admin);

    let result: CommandResult =
        run(&mut dataset, &actor, Command::DeletePerson { index: 1 }).unwrap();

    assert_eq!(result.interaction, Some(UiInteraction::Exit));
}

#[test]
fn test_delete_with_invalid_index_fails() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(2);

    assert_eq!(
        run(&mut dataset, &admin(), Command::DeletePerson { index: 3 }),
        Err(CoreError::InvalidIndex(3))
    );
}

#[test]
fn test_edit_person_changes_fields() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(2);
    let edit: PersonEdit = PersonEdit {
        name: Some(String::from("Brandon Foo")),
        rank: Some(String::from("SGT")),
        ..PersonEdit::default()
    };

    run(&mut dataset, &admin(), Command::EditPerson { index: 1, edit }).unwrap();

    let person: &Person = dataset.live().person_at(1).unwrap();
    assert_eq!(person.name, "Brandon Foo");
    assert_eq!(person.rank, "SGT");
    assert_eq!(person.nric, nric(1));
    // Editing keeps the schedule.
    assert!(
        dataset
            .live()
            .calendar()
            .next()
            .duty(1)
            .unwrap()
            .contains(&nric(1))
    );
}

#[test]
fn test_empty_edit_is_rejected() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(1);

    let result: Result<CommandResult, CoreError> = run(
        &mut dataset,
        &admin(),
        Command::EditPerson {
            index: 1,
            edit: PersonEdit::default(),
        },
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidField {
            field: "edit",
            ..
        }))
    ));
}

#[test]
fn test_clear_removes_everyone() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(3);

    run(&mut dataset, &admin(), Command::Clear).unwrap();

    assert!(dataset.live().persons().is_empty());
    assert!(dataset.live().calendar().ledger().rows().is_empty());
}

#[test]
fn test_list_is_read_only() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(2);
    let before: usize = dataset.version();

    let result: CommandResult = run(&mut dataset, &general(1), Command::List).unwrap();

    assert!(!result.modified);
    assert_eq!(result.interaction, Some(UiInteraction::PeopleList));
    assert!(result.feedback.contains("\n2. S0000002A"));
    assert_eq!(dataset.version(), before);
}

// ============================================================================
// Scheduling commands
// ============================================================================

#[test]
fn test_schedule_fills_next_month() {
    let dataset: VersionedPersonnelDatabase = create_scheduled_dataset(5);

    let next: &DutyMonth = dataset.live().calendar().next();
    assert!(next.scheduled_duties().iter().all(|d| d.persons().len() == 1));
    for n in 1..=5 {
        assert_eq!(next.duties_of(&nric(n)).len(), 6);
    }
}

#[test]
fn test_infeasible_schedule_commits_nothing() {
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(create_test_database());

    let result: Result<CommandResult, CoreError> = run(&mut dataset, &admin(), Command::Schedule);

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::SchedulingInfeasible {
                day: 1,
                required: 1,
                available: 0,
            }
        ))
    );
    assert_eq!(dataset.version(), 0);
}

#[test]
fn test_confirm_and_unconfirm() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(3);

    let confirmed: CommandResult =
        run(&mut dataset, &admin(), Command::ConfirmSchedule).unwrap();
    assert_eq!(confirmed.feedback, "Schedule for June 2026 confirmed!");
    assert!(dataset.live().calendar().next().is_confirmed());

    let again: CommandResult = run(&mut dataset, &admin(), Command::ConfirmSchedule).unwrap();
    assert!(!again.modified);

    assert_eq!(
        run(&mut dataset, &admin(), Command::Schedule),
        Err(CoreError::DomainViolation(DomainError::RosterConfirmed))
    );

    run(&mut dataset, &admin(), Command::Unconfirm).unwrap();
    assert!(!dataset.live().calendar().next().is_confirmed());
}

#[test]
fn test_confirming_unscheduled_month_fails() {
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(create_database_with_persons(2));

    assert_eq!(
        run(&mut dataset, &admin(), Command::ConfirmSchedule),
        Err(CoreError::DomainViolation(DomainError::RosterUnderstaffed {
            day: 1
        }))
    );
}

#[test]
fn test_block_view_and_remove_dates() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(3);

    let blocked: CommandResult = run(
        &mut dataset,
        &general(1),
        Command::BlockDate { days: vec![3, 1] },
    )
    .unwrap();
    assert_eq!(blocked.feedback, "Blocked dates for June 2026: 1, 3");
    // Blocking keeps existing assignments.
    assert!(
        dataset
            .live()
            .calendar()
            .next()
            .duty(1)
            .unwrap()
            .contains(&nric(1))
    );

    let viewed: CommandResult = run(&mut dataset, &general(1), Command::ViewBlock).unwrap();
    assert_eq!(
        viewed.feedback,
        "Below are the blocked dates for next month: 1, 3"
    );

    run(&mut dataset, &general(1), Command::RemoveBlock).unwrap();
    let viewed: CommandResult = run(&mut dataset, &general(1), Command::ViewBlock).unwrap();
    assert_eq!(viewed.feedback, "You have no blocked dates for next month");
}

#[test]
fn test_block_rejects_day_outside_month() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(2);

    assert_eq!(
        run(
            &mut dataset,
            &general(1),
            Command::BlockDate { days: vec![2, 31] }
        ),
        Err(CoreError::DomainViolation(DomainError::InvalidDay {
            day: 31,
            days_in_month: 30
        }))
    );
    assert!(
        dataset
            .live()
            .calendar()
            .next()
            .blocked_days_of(&nric(1))
            .is_empty()
    );
}

#[test]
fn test_view_lists_own_duties() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(3);

    let result: CommandResult = run(&mut dataset, &general(1), Command::View).unwrap();

    assert!(result.feedback.starts_with("Viewing S0000001A's duties!"));
    assert!(
        result
            .feedback
            .contains("Duty 1: Month: June 2026, Day: 1 with no one else")
    );
    assert_eq!(result.feedback.matches("\nDuty ").count(), 10);
}

#[test]
fn test_view_without_duties() {
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(create_database_with_persons(1));

    let result: CommandResult = run(&mut dataset, &general(1), Command::View).unwrap();

    assert_eq!(result.feedback, "S0000001A has no duties!");
}

// ============================================================================
// Points commands
// ============================================================================

#[test]
fn test_reward_and_penalize_many_persons() {
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(create_database_with_persons(3));

    run(
        &mut dataset,
        &admin(),
        Command::Reward {
            points: 4,
            indices: vec![1, 3, 1],
        },
    )
    .unwrap();
    let result: CommandResult = run(
        &mut dataset,
        &admin(),
        Command::Penalize {
            points: 6,
            indices: vec![3],
        },
    )
    .unwrap();

    let ledger: &PointsLedger = dataset.live().calendar().ledger();
    assert_eq!(ledger.total(&nric(1)), 4);
    assert_eq!(ledger.total(&nric(2)), 0);
    assert_eq!(ledger.total(&nric(3)), -2);
    assert_eq!(
        result.feedback,
        "Successfully penalized 6 points from CPL Person 3 (S0000003A)"
    );
}

#[test]
fn test_points_with_invalid_index_change_nothing() {
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(create_database_with_persons(2));

    let result: Result<CommandResult, CoreError> = run(
        &mut dataset,
        &admin(),
        Command::Reward {
            points: 1,
            indices: vec![1, 9],
        },
    );

    assert_eq!(result, Err(CoreError::InvalidIndex(9)));
    assert_eq!(dataset.live().calendar().ledger().total(&nric(1)), 0);
    assert_eq!(dataset.version(), 0);
}

#[test]
fn test_reward_past_maximum_total_commits_nothing() {
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(create_database_with_persons(2));
    run(
        &mut dataset,
        &admin(),
        Command::Reward {
            points: i64::MAX,
            indices: vec![1],
        },
    )
    .unwrap();

    let result: Result<CommandResult, CoreError> = run(
        &mut dataset,
        &admin(),
        Command::Reward {
            points: 1,
            indices: vec![2, 1],
        },
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::PointsOverflow(nric(1))))
    );
    let ledger: &PointsLedger = dataset.live().calendar().ledger();
    assert_eq!(ledger.total(&nric(1)), i64::MAX);
    assert_eq!(ledger.total(&nric(2)), 0);
    assert_eq!(dataset.version(), 1);
}

#[test]
fn test_non_positive_points_are_rejected() {
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(create_database_with_persons(1));

    assert_eq!(
        run(
            &mut dataset,
            &admin(),
            Command::Penalize {
                points: 0,
                indices: vec![1],
            }
        ),
        Err(CoreError::DomainViolation(DomainError::InvalidPoints(0)))
    );
}

#[test]
fn test_points_queries() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(2);

    let all: CommandResult =
        run(&mut dataset, &admin(), Command::Points { index: None }).unwrap();
    assert_eq!(
        all.feedback,
        "Duty points:\nCPL Person 1 (S0000001A): 15\nCPL Person 2 (S0000002A): 15"
    );
    assert!(!all.modified);

    let one: CommandResult =
        run(&mut dataset, &admin(), Command::Points { index: Some(2) }).unwrap();
    assert!(one.feedback.starts_with("CPL Person 2 (S0000002A) has 15 points"));
    assert!(one.feedback.contains("1. Duty on 2026-06-02: +1"));
}

// ============================================================================
// Registry queries and sorting
// ============================================================================

fn create_unsorted_database() -> PersonnelDatabase {
    let mut database: PersonnelDatabase = create_test_database();
    for (n, name) in [(1, "Zed Tan"), (2, "amy Lim"), (3, "Amy Koh")] {
        let mut person: Person = create_test_person(n);
        person.name = String::from(name);
        database.add_person(person).unwrap();
    }
    database
}

#[test]
fn test_find_matches_whole_name_words() {
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(create_unsorted_database());

    let found: CommandResult = run(
        &mut dataset,
        &general(1),
        Command::Find {
            keywords: vec![String::from("AMY"), String::from("tan")],
        },
    )
    .unwrap();
    assert!(!found.modified);
    assert_eq!(found.interaction, Some(UiInteraction::PeopleList));
    let lines: Vec<&str> = found.feedback.lines().collect();
    assert_eq!(lines[0], "3 persons listed!");
    assert!(lines[1].starts_with("1. S0000001A"));
    assert!(lines[3].starts_with("3. S0000003A"));

    let partial: CommandResult = run(
        &mut dataset,
        &admin(),
        Command::Find {
            keywords: vec![String::from("Am")],
        },
    )
    .unwrap();
    assert_eq!(partial.feedback, "0 persons listed!");
    assert_eq!(dataset.version(), 0);
}

#[test]
fn test_find_without_keywords_is_rejected() {
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(create_unsorted_database());

    let result: Result<CommandResult, CoreError> = run(
        &mut dataset,
        &admin(),
        Command::Find {
            keywords: vec![String::from("  ")],
        },
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidField {
            field: "keywords",
            ..
        }))
    ));
}

#[test]
fn test_sort_orders_registry_by_name_and_can_be_undone() {
    let unsorted: PersonnelDatabase = create_unsorted_database();
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(unsorted.clone());

    let result: CommandResult = run(&mut dataset, &general(1), Command::Sort).unwrap();

    assert!(result.modified);
    assert_eq!(dataset.version(), 1);
    let order: Vec<&str> = dataset
        .live()
        .persons()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(order, vec!["Amy Koh", "amy Lim", "Zed Tan"]);
    assert_eq!(dataset.live().person_at(1).unwrap().nric, nric(3));

    run(&mut dataset, &admin(), Command::Undo).unwrap();
    assert_eq!(dataset.live(), &unsorted);
}

#[test]
fn test_sorting_sorted_registry_commits_nothing() {
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(create_database_with_persons(3));

    let result: CommandResult = run(&mut dataset, &admin(), Command::Sort).unwrap();

    assert!(!result.modified);
    assert_eq!(dataset.version(), 0);
}

// ============================================================================
// Roster display
// ============================================================================

#[test]
fn test_admin_can_view_next_roster_day_by_day() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(3);

    let result: CommandResult = run(
        &mut dataset,
        &admin(),
        Command::ViewRoster {
            month: RosterMonth::Next,
        },
    )
    .unwrap();

    let lines: Vec<&str> = result.feedback.lines().collect();
    assert_eq!(lines[0], "Duties for June 2026 (unconfirmed):");
    assert_eq!(lines[1], "01 Mon: CPL Person 1 (S0000001A)");
    assert_eq!(lines[2], "02 Tue: CPL Person 2 (S0000002A)");
    assert_eq!(lines.len(), 31);
    assert!(!result.modified);
}

#[test]
fn test_unscheduled_roster_shows_empty_days() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(3);

    let result: CommandResult = run(
        &mut dataset,
        &general(2),
        Command::ViewRoster {
            month: RosterMonth::Current,
        },
    )
    .unwrap();

    let lines: Vec<&str> = result.feedback.lines().collect();
    assert_eq!(lines[0], "Duties for May 2026 (unconfirmed):");
    assert_eq!(lines[1], "01 Fri: -");
    assert_eq!(lines[31], "31 Sun: -");
}

// ============================================================================
// Session commands
// ============================================================================

#[test]
fn test_duty_settings_change_only_given_fields() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(3);
    let mut session: DutySettings = settings();

    let result: CommandResult = execute(
        Command::DutySettings {
            headcount: None,
            rest_days: Some(2),
            points: Some(3),
        },
        &admin(),
        &mut dataset,
        &mut session,
    )
    .unwrap();

    assert_eq!(session, DutySettings::new(1, 2, 3).unwrap());
    assert_eq!(result.interaction, Some(UiInteraction::SettingsChanged));
    assert!(!result.modified);
    assert_eq!(dataset.version(), 1);
}

#[test]
fn test_duty_settings_without_changes_shows_current() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(1);
    let mut session: DutySettings = settings();

    let result: CommandResult = execute(
        Command::DutySettings {
            headcount: None,
            rest_days: None,
            points: None,
        },
        &admin(),
        &mut dataset,
        &mut session,
    )
    .unwrap();

    assert_eq!(
        result.feedback,
        "Duty settings: 1 per day, 0 rest days, 1 points per duty"
    );
    assert_eq!(result.interaction, None);
    assert_eq!(session, settings());
}

#[test]
fn test_invalid_duty_settings_keep_current() {
    let mut dataset: VersionedPersonnelDatabase = create_scheduled_dataset(1);
    let mut session: DutySettings = settings();

    let result: Result<CommandResult, CoreError> = execute(
        Command::DutySettings {
            headcount: Some(0),
            rest_days: Some(4),
            points: None,
        },
        &admin(),
        &mut dataset,
        &mut session,
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidSettings(_)))
    ));
    assert_eq!(session, settings());
}

#[test]
fn test_history_lists_live_commands_most_recent_first() {
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(create_database_with_persons(2));

    let empty: CommandResult = run(&mut dataset, &general(1), Command::History).unwrap();
    assert_eq!(empty.feedback, "You have not yet entered any commands.");

    run(&mut dataset, &admin(), Command::Schedule).unwrap();
    run(&mut dataset, &admin(), Command::ConfirmSchedule).unwrap();
    run(&mut dataset, &admin(), Command::Undo).unwrap();
    run(
        &mut dataset,
        &admin(),
        Command::Reward {
            points: 2,
            indices: vec![1],
        },
    )
    .unwrap();

    let listed: CommandResult = run(&mut dataset, &general(1), Command::History).unwrap();
    let lines: Vec<&str> = listed.feedback.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("1. Reward by"));
    assert!(lines[2].starts_with("2. Schedule by"));
    assert!(!listed.modified);
}

#[test]
fn test_session_commands_cannot_be_applied_alone() {
    let database: PersonnelDatabase = create_database_with_persons(1);

    assert_eq!(
        apply(&database, Command::History, &admin(), &settings()),
        Err(CoreError::SessionCommand("History"))
    );
}

// ============================================================================
// History commands
// ============================================================================

#[test]
fn test_undo_and_redo_commands() {
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(create_database_with_persons(2));
    run(&mut dataset, &admin(), Command::Schedule).unwrap();
    let scheduled: PersonnelDatabase = dataset.live().clone();

    let undone: CommandResult = run(&mut dataset, &general(1), Command::Undo).unwrap();
    assert_eq!(undone.feedback, "Undo success!");
    assert!(undone.modified);
    assert_eq!(dataset.live(), &create_database_with_persons(2));

    run(&mut dataset, &admin(), Command::Redo).unwrap();
    assert_eq!(dataset.live(), &scheduled);

    assert_eq!(
        run(&mut dataset, &admin(), Command::Redo),
        Err(CoreError::RedoUnavailable)
    );
}

#[test]
fn test_undo_with_empty_history_fails() {
    let mut dataset: VersionedPersonnelDatabase =
        VersionedPersonnelDatabase::new(create_test_database());

    assert_eq!(
        run(&mut dataset, &admin(), Command::Undo),
        Err(CoreError::UndoUnavailable)
    );
}

#[test]
fn test_apply_never_touches_input() {
    let database: PersonnelDatabase = create_database_with_persons(2);
    let before: PersonnelDatabase = database.clone();

    let outcome: ApplyOutcome =
        apply(&database, Command::Schedule, &admin(), &settings()).unwrap();

    assert_eq!(database, before);
    match outcome {
        ApplyOutcome::Transition(transition) => {
            assert_eq!(transition.audit_event.action.name, "Schedule");
            assert_eq!(transition.audit_event.actor, admin());
            assert_ne!(transition.audit_event.before, transition.audit_event.after);
        }
        ApplyOutcome::Query(_) => panic!("schedule must change the dataset"),
    }
}
