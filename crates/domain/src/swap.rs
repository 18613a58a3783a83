// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Duty swap requests and their state machine.
//!
//! ```text
//! Pending  --accept (counterpart)-->        Accepted
//! Accepted --approve (admin)-->             Approved   roster updated
//! Pending  --reject (admin|counterpart)-->  Rejected
//! Accepted --reject (admin)-->              Rejected
//! Pending  --person deleted-->              Cancelled
//! Accepted --person deleted-->              Cancelled
//! ```
//!
//! `Approved`, `Rejected` and `Cancelled` are terminal. A failed transition leaves the
//! request and the roster unchanged.

use crate::calendar::YearMonth;
use crate::duty_month::{DutyMonth, RestContext};
use crate::error::DomainError;
use crate::types::{Nric, Role};
use serde::{Deserialize, Serialize};

/// Status of a swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    /// Waiting for the counterpart to accept.
    Pending,
    /// Accepted by the counterpart, waiting for an admin.
    Accepted,
    /// Approved by an admin; the duties have been exchanged.
    Approved,
    /// Rejected by the counterpart or an admin.
    Rejected,
    /// Withdrawn because a person it names was deleted.
    Cancelled,
}

impl SwapStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Cancelled)
    }

    /// Checks if a transition from this status to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Accepted | Self::Rejected | Self::Cancelled)
                | (Self::Accepted, Self::Approved | Self::Rejected | Self::Cancelled)
        )
    }
}

impl std::fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to exchange one duty day between two persons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    /// The person offering their duty.
    pub requester: Nric,
    /// The month both duties are in.
    pub month: YearMonth,
    /// The requester's duty day being offered.
    pub day: u8,
    /// The person asked to take the offered duty.
    pub counterpart: Nric,
    /// The counterpart's duty day the requester takes in exchange.
    pub counterpart_day: u8,
    /// Where the request is in its lifecycle.
    pub status: SwapStatus,
}

impl SwapRequest {
    /// Creates a pending request.
    #[must_use]
    pub const fn new(
        requester: Nric,
        month: YearMonth,
        day: u8,
        counterpart: Nric,
        counterpart_day: u8,
    ) -> Self {
        Self {
            requester,
            month,
            day,
            counterpart,
            counterpart_day,
            status: SwapStatus::Pending,
        }
    }

    /// Returns true if the request names the person on either side.
    #[must_use]
    pub fn involves(&self, nric: &Nric) -> bool {
        &self.requester == nric || &self.counterpart == nric
    }

    const fn transition(
        &self,
        target: SwapStatus,
        action: &'static str,
    ) -> Result<(), DomainError> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidStateTransition {
                from: self.status,
                action,
            })
        }
    }

    /// The counterpart accepts the request.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless pending, and
    /// `AuthorizationDenied` if `actor` is not the counterpart.
    pub fn accept(&mut self, actor: Option<&Nric>) -> Result<(), DomainError> {
        self.transition(SwapStatus::Accepted, "accept")?;
        if actor != Some(&self.counterpart) {
            return Err(DomainError::AuthorizationDenied { action: "accept" });
        }
        self.status = SwapStatus::Accepted;
        Ok(())
    }

    /// An admin approves an accepted request and exchanges the duties.
    ///
    /// `roster` is the roster for [`SwapRequest::month`], or `None` if that
    /// month is no longer held by the calendar. `rest` carries the rest-day
    /// rule and the rosters around it.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin, the request is not
    /// accepted, the roster is gone, or the duties no longer match.
    pub fn approve(
        &mut self,
        role: Role,
        roster: Option<&mut DutyMonth>,
        rest: &RestContext<'_>,
    ) -> Result<(), DomainError> {
        if role != Role::Admin {
            return Err(DomainError::AuthorizationDenied { action: "approve" });
        }
        self.transition(SwapStatus::Approved, "approve")?;
        let Some(roster) = roster else {
            return Err(DomainError::DutyNotFound {
                nric: self.requester.clone(),
                day: self.day,
            });
        };
        roster.swap_assignments(
            &self.requester,
            self.day,
            &self.counterpart,
            self.counterpart_day,
            rest,
        )?;
        self.status = SwapStatus::Approved;
        Ok(())
    }

    /// Rejects the request.
    ///
    /// A pending request may be rejected by an admin or the counterpart; an
    /// accepted request only by an admin.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` from a terminal status and
    /// `AuthorizationDenied` for any other actor.
    pub fn reject(&mut self, actor: Option<&Nric>, role: Role) -> Result<(), DomainError> {
        self.transition(SwapStatus::Rejected, "reject")?;
        let is_counterpart: bool = actor == Some(&self.counterpart);
        let allowed: bool = role == Role::Admin
            || (self.status == SwapStatus::Pending && is_counterpart);
        if !allowed {
            return Err(DomainError::AuthorizationDenied { action: "reject" });
        }
        self.status = SwapStatus::Rejected;
        Ok(())
    }
}

impl std::fmt::Display for SwapRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} gives {}-{:02} to {} for {}-{:02}",
            self.status,
            self.requester,
            self.month,
            self.day,
            self.counterpart,
            self.month,
            self.counterpart_day
        )
    }
}

/// All swap requests, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwapBook {
    requests: Vec<SwapRequest>,
}

impl SwapBook {
    /// Creates an empty book.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requests: Vec::new(),
        }
    }

    /// Rebuilds a book from stored requests.
    #[must_use]
    pub const fn from_requests(requests: Vec<SwapRequest>) -> Self {
        Self { requests }
    }

    /// Returns every request in submission order.
    #[must_use]
    pub fn requests(&self) -> &[SwapRequest] {
        &self.requests
    }

    /// Adds a pending request and returns its zero-based position.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SwapConflict` if an open request already offers
    /// the same duty, or the requester and counterpart are the same person.
    pub fn submit(&mut self, request: SwapRequest) -> Result<usize, DomainError> {
        if request.requester == request.counterpart {
            return Err(DomainError::SwapConflict(String::from(
                "cannot swap a duty with yourself",
            )));
        }
        let duplicate: bool = self.requests.iter().any(|r| {
            !r.status.is_terminal()
                && r.requester == request.requester
                && r.month == request.month
                && r.day == request.day
        });
        if duplicate {
            return Err(DomainError::SwapConflict(format!(
                "an open request already offers {}-{:02}",
                request.month, request.day
            )));
        }
        self.requests.push(request);
        Ok(self.requests.len() - 1)
    }

    /// Returns the request at a zero-based position.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SwapNotFound` with the one-based position.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut SwapRequest, DomainError> {
        self.requests
            .get_mut(index)
            .ok_or(DomainError::SwapNotFound(index + 1))
    }

    /// Cancels every open request that names the person.
    ///
    /// Requests keep their positions; finished requests are left as they are.
    pub fn remove_person(&mut self, nric: &Nric) {
        for request in &mut self.requests {
            if request.involves(nric) && request.status.can_transition_to(SwapStatus::Cancelled) {
                request.status = SwapStatus::Cancelled;
            }
        }
    }

    /// Rewrites references after a person's NRIC changed.
    pub fn rename_person(&mut self, from: &Nric, to: &Nric) {
        for request in &mut self.requests {
            if &request.requester == from {
                request.requester = to.clone();
            }
            if &request.counterpart == from {
                request.counterpart = to.clone();
            }
        }
    }
}
