// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hold lease state machine
//!
//! A lease records which seats one allocation put on hold and until when.
//! It starts `Active` and settles exactly once, either `Confirmed` by a
//! reservation or `Expired` by the scheduler. Settled leases ignore all
//! further input.

use crate::clock::Clock;
use crate::grid::VenueId;
use crate::id::LeaseId;
use crate::seat::SeatPosition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaseState {
    Active,
    Confirmed,
    Expired,
}

impl LeaseState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, LeaseState::Active)
    }
}

impl std::fmt::Display for LeaseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LeaseState::Active => "active",
            LeaseState::Confirmed => "confirmed",
            LeaseState::Expired => "expired",
        };
        f.write_str(name)
    }
}

/// Inputs that drive a lease
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeaseInput {
    /// The held seats were reserved
    Confirm,
    /// Periodic deadline check
    Tick,
}

/// Emitted when a lease settles
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeaseEvent {
    Confirmed { id: LeaseId },
    Expired { id: LeaseId },
}

/// One in-flight hold
#[derive(Clone, Debug)]
pub struct HoldLease {
    pub id: LeaseId,
    pub venue: VenueId,
    /// Who asked for the hold, if the caller said
    pub requester: Option<String>,
    /// Held seats in allocation order; owned by the lease, never shared with callers
    pub seats: Vec<SeatPosition>,
    pub created_at: Instant,
    /// Wall-clock creation time, for display only
    pub held_at: DateTime<Utc>,
    pub hold_for: Duration,
    pub state: LeaseState,
    pub settled_at: Option<Instant>,
}

impl HoldLease {
    pub fn new(
        id: LeaseId,
        venue: VenueId,
        seats: Vec<SeatPosition>,
        hold_for: Duration,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id,
            venue,
            requester: None,
            seats,
            created_at: clock.now(),
            held_at: Utc::now(),
            hold_for,
            state: LeaseState::Active,
            settled_at: None,
        }
    }

    pub fn with_requester(mut self, requester: impl Into<String>) -> Self {
        self.requester = Some(requester.into());
        self
    }

    /// `None` when the hold outlasts what `Instant` can represent
    pub fn deadline(&self) -> Option<Instant> {
        self.created_at.checked_add(self.hold_for)
    }

    /// Wall-clock deadline, for display
    pub fn expires_at(&self) -> DateTime<Utc> {
        chrono::Duration::from_std(self.hold_for)
            .ok()
            .and_then(|d| self.held_at.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_active(&self) -> bool {
        self.state == LeaseState::Active
    }

    /// Active and past its deadline
    pub fn is_due(&self, clock: &impl Clock) -> bool {
        self.is_active() && self.deadline().is_some_and(|d| clock.has_reached(d))
    }

    pub fn covers(&self, position: SeatPosition) -> bool {
        self.seats.contains(&position)
    }

    /// Pure state transition function
    pub fn transition(&self, input: LeaseInput, clock: &impl Clock) -> (HoldLease, Option<LeaseEvent>) {
        let mut next = self.clone();
        if self.state.is_terminal() {
            return (next, None);
        }

        let event = match input {
            LeaseInput::Confirm => {
                next.state = LeaseState::Confirmed;
                Some(LeaseEvent::Confirmed {
                    id: self.id.clone(),
                })
            }
            LeaseInput::Tick if self.is_due(clock) => {
                next.state = LeaseState::Expired;
                Some(LeaseEvent::Expired {
                    id: self.id.clone(),
                })
            }
            LeaseInput::Tick => None,
        };
        if event.is_some() {
            next.settled_at = Some(clock.now());
        }

        (next, event)
    }
}

#[cfg(test)]
#[path = "lease_tests.rs"]
mod tests;
