// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Snapshot history of the personnel dataset.
//!
//! Every committed command appends one immutable snapshot. Undo and redo
//! move a cursor through the history; the snapshot under the cursor is the
//! live dataset. Committing while the cursor is not at the end discards the
//! snapshots after it.
//!
//! Observers registered with [`VersionedPersonnelDatabase::subscribe`] are
//! called synchronously, in registration order, after every commit, undo,
//! redo and reset.

use crate::database::PersonnelDatabase;
use crate::error::CoreError;
use duty_planner_audit::AuditEvent;
use std::sync::Arc;
use tracing::info;

/// A change to the live dataset, published to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeNotice {
    /// A command was committed as a new version.
    Committed {
        /// Position of the new version in the history.
        version: usize,
        /// The record of the command.
        event: AuditEvent,
    },
    /// The live dataset moved back one version.
    Undone {
        /// Position of the now-live version.
        version: usize,
    },
    /// The live dataset moved forward one version.
    Redone {
        /// Position of the now-live version.
        version: usize,
    },
    /// The history was replaced by a single version.
    Reset,
}

type Observer = Box<dyn FnMut(&ChangeNotice)>;

/// The personnel dataset with undo/redo history and change notifications.
pub struct VersionedPersonnelDatabase {
    states: Vec<Arc<PersonnelDatabase>>,
    /// `events[i]` produced `states[i + 1]`.
    events: Vec<AuditEvent>,
    current: usize,
    observers: Vec<Observer>,
}

impl VersionedPersonnelDatabase {
    /// Creates a history holding only `initial`.
    #[must_use]
    pub fn new(initial: PersonnelDatabase) -> Self {
        Self {
            states: vec![Arc::new(initial)],
            events: Vec::new(),
            current: 0,
            observers: Vec::new(),
        }
    }

    /// Returns the live dataset.
    #[must_use]
    pub fn live(&self) -> &PersonnelDatabase {
        &self.states[self.current]
    }

    /// Returns a shared handle to the live snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<PersonnelDatabase> {
        Arc::clone(&self.states[self.current])
    }

    /// Returns the position of the live version in the history.
    #[must_use]
    pub const fn version(&self) -> usize {
        self.current
    }

    /// Returns the number of versions held, including the redo branch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: the history holds at least one version.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the records of the commands that produced the live dataset,
    /// oldest first. Undone commands are not included.
    #[must_use]
    pub fn history(&self) -> &[AuditEvent] {
        &self.events[..self.current]
    }

    /// Registers an observer for change notices.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&ChangeNotice) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Makes `state` the new live version and discards the redo branch.
    pub fn commit(&mut self, state: PersonnelDatabase, event: AuditEvent) {
        self.states.truncate(self.current + 1);
        self.events.truncate(self.current);
        self.states.push(Arc::new(state));
        self.events.push(event.clone());
        self.current += 1;
        info!(version = self.current, event = %event, "Committed change");
        self.publish(&ChangeNotice::Committed {
            version: self.current,
            event,
        });
    }

    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.current > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.states.len()
    }

    /// Moves the live dataset back one version.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UndoUnavailable` at the oldest version.
    pub fn undo(&mut self) -> Result<(), CoreError> {
        if !self.can_undo() {
            return Err(CoreError::UndoUnavailable);
        }
        self.current -= 1;
        info!(version = self.current, "Undid change");
        self.publish(&ChangeNotice::Undone {
            version: self.current,
        });
        Ok(())
    }

    /// Moves the live dataset forward one version.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::RedoUnavailable` at the newest version.
    pub fn redo(&mut self) -> Result<(), CoreError> {
        if !self.can_redo() {
            return Err(CoreError::RedoUnavailable);
        }
        self.current += 1;
        info!(version = self.current, "Redid change");
        self.publish(&ChangeNotice::Redone {
            version: self.current,
        });
        Ok(())
    }

    /// Replaces the whole history with a single version.
    pub fn reset(&mut self, state: PersonnelDatabase) {
        self.states = vec![Arc::new(state)];
        self.events.clear();
        self.current = 0;
        self.publish(&ChangeNotice::Reset);
    }

    fn publish(&mut self, notice: &ChangeNotice) {
        for observer in &mut self.observers {
            observer(notice);
        }
    }
}

impl std::fmt::Debug for VersionedPersonnelDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionedPersonnelDatabase")
            .field("versions", &self.states.len())
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .finish()
    }
}
