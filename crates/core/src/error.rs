// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::RequiredRole;
use duty_planner_domain::DomainError;

/// Errors that can occur while executing a command.
///
/// Every error leaves the live dataset unchanged, except
/// `PersistenceFailure`, which is reported after the change was committed
/// in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The actor does not hold the role the command requires.
    AuthorizationDenied {
        /// The command that was refused.
        command: &'static str,
        /// The role the command requires.
        required: RequiredRole,
    },
    /// A one-based list index does not name an entry.
    InvalidIndex(usize),
    /// There is no earlier state to return to.
    UndoUnavailable,
    /// There is no later state to return to.
    RedoUnavailable,
    /// The storage collaborator failed to load or save.
    PersistenceFailure(String),
    /// The command acts on the session rather than on one dataset version.
    SessionCommand(&'static str),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "{err}"),
            Self::AuthorizationDenied { command, required } => write!(
                f,
                "You do not have the authority to run '{command}' ({required} only)"
            ),
            Self::InvalidIndex(index) => write!(f, "The index {index} is invalid"),
            Self::UndoUnavailable => write!(f, "No more commands to undo!"),
            Self::RedoUnavailable => write!(f, "No more commands to redo!"),
            Self::PersistenceFailure(msg) => write!(f, "Could not save data: {msg}"),
            Self::SessionCommand(command) => {
                write!(f, "'{command}' can only be run within a planner session")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
