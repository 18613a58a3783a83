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
    clippy::all
)]

#[cfg(test)]
mod tests;

use duty_planner_domain::{Nric, Role};

/// The user a command runs as.
///
/// General users are always identified by their NRIC. The built-in admin
/// account has no NRIC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The actor's NRIC, if the account is tied to a person.
    pub nric: Option<Nric>,
    /// The role the actor holds.
    pub role: Role,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `nric` - The actor's NRIC, if any
    /// * `role` - The actor's role
    #[must_use]
    pub const fn new(nric: Option<Nric>, role: Role) -> Self {
        Self { nric, role }
    }

    /// The built-in admin account.
    #[must_use]
    pub const fn admin() -> Self {
        Self::new(None, Role::Admin)
    }

    /// A general user identified by NRIC.
    #[must_use]
    pub const fn general(nric: Nric) -> Self {
        Self::new(Some(nric), Role::General)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Returns true if this actor is the person with the given NRIC.
    #[must_use]
    pub fn is(&self, nric: &Nric) -> bool {
        self.nric.as_ref() == Some(nric)
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.nric {
            Some(nric) => write!(f, "{} {nric}", self.role),
            None => write!(f, "{}", self.role),
        }
    }
}

/// The change a command made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The command name (e.g., "`Schedule`", "`ApproveSwap`").
    pub name: String,
    /// Optional additional details about the change.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A short summary of the dataset at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// A record of one committed change to the personnel dataset.
///
/// Every committed command produces exactly one event. It names who ran
/// the command, what it did, and a summary of the dataset before and
/// after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who ran the command.
    pub actor: Actor,
    /// The action that was performed.
    pub action: Action,
    /// The dataset before the change.
    pub before: StateSnapshot,
    /// The dataset after the change.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who ran the command
    /// * `action` - The action that was performed
    /// * `before` - The dataset summary before the change
    /// * `after` - The dataset summary after the change
    #[must_use]
    pub const fn new(
        actor: Actor,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            actor,
            action,
            before,
            after,
        }
    }
}

impl std::fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} by {}", self.action.name, self.actor)?;
        if let Some(details) = &self.action.details {
            write!(f, ": {details}")?;
        }
        Ok(())
    }
}
