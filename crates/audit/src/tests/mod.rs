// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Actor, AuditEvent, StateSnapshot};
use duty_planner_domain::{Nric, Role};

fn create_test_event(actor: Actor) -> AuditEvent {
    AuditEvent::new(
        actor,
        Action::new(String::from("Schedule"), Some(String::from("2026-11"))),
        StateSnapshot::new(String::from("persons=3 next=unconfirmed")),
        StateSnapshot::new(String::from("persons=3 next=scheduled")),
    )
}

#[test]
fn test_admin_actor_has_no_nric() {
    let actor: Actor = Actor::admin();

    assert_eq!(actor.nric, None);
    assert!(actor.is_admin());
    assert_eq!(actor.to_string(), "admin");
}

#[test]
fn test_general_actor_is_identified_by_nric() {
    let nric: Nric = Nric::new("s1234567d");
    let actor: Actor = Actor::general(nric.clone());

    assert!(!actor.is_admin());
    assert!(actor.is(&nric));
    assert!(!actor.is(&Nric::new("S7654321A")));
    assert_eq!(actor.to_string(), "general S1234567D");
}

#[test]
fn test_admin_is_not_any_person() {
    assert!(!Actor::admin().is(&Nric::new("S1234567D")));
}

#[test]
fn test_actor_equality() {
    let a: Actor = Actor::general(Nric::new("S1234567D"));
    let b: Actor = Actor::new(Some(Nric::new("S1234567D")), Role::General);
    let c: Actor = Actor::new(Some(Nric::new("S1234567D")), Role::Admin);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_action_creation_with_details() {
    let action: Action = Action::new(String::from("Reward"), Some(String::from("+5")));

    assert_eq!(action.name, "Reward");
    assert_eq!(action.details, Some(String::from("+5")));
}

#[test]
fn test_audit_event_keeps_all_fields() {
    let event: AuditEvent = create_test_event(Actor::admin());

    assert_eq!(event.actor, Actor::admin());
    assert_eq!(event.action.name, "Schedule");
    assert_eq!(event.before.data, "persons=3 next=unconfirmed");
    assert_eq!(event.after.data, "persons=3 next=scheduled");
    assert_eq!(event.clone(), event);
}

#[test]
fn test_audit_event_display() {
    let event: AuditEvent = create_test_event(Actor::admin());
    assert_eq!(event.to_string(), "Schedule by admin: 2026-11");

    let plain: AuditEvent = AuditEvent::new(
        Actor::general(Nric::new("S1234567D")),
        Action::new(String::from("BlockDate"), None),
        StateSnapshot::new(String::new()),
        StateSnapshot::new(String::new()),
    );
    assert_eq!(plain.to_string(), "BlockDate by general S1234567D");
}
