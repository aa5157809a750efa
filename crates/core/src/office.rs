// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Box office: one venue with its holds and confirmations
//!
//! Ties the allocator, the lease scheduler and the confirmer together behind
//! a single handle. Generic over [`Clock`] and [`IdGen`] so tests can drive
//! expiry and predict lease ids.

use crate::allocator::{self, AllocationError};
use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigError, HoldConfig, UsherConfig};
use crate::grid::{SeatGrid, Venue};
use crate::id::{IdGen, LeaseId, UuidIdGen};
use crate::lease::{HoldLease, LeaseState};
use crate::reservation::{ReservationConfirmer, ReservationError};
use crate::scheduler::{ExpiredHold, LeaseScheduler, SweeperHandle};
use crate::seat::{Seat, SeatPosition};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// A request to hold seats
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoldRequest {
    pub requester: String,
    pub seats: usize,
}

impl HoldRequest {
    pub fn new(requester: impl Into<String>, seats: usize) -> Self {
        Self {
            requester: requester.into(),
            seats,
        }
    }
}

/// What a successful hold hands back to the caller
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HoldReceipt {
    pub lease_id: LeaseId,
    pub seats: Vec<Seat>,
    /// Wall-clock deadline, for display
    pub expires_at: DateTime<Utc>,
}

impl HoldReceipt {
    pub fn positions(&self) -> Vec<SeatPosition> {
        self.seats.iter().map(Seat::position).collect()
    }
}

pub struct BoxOffice<C: Clock = SystemClock, G: IdGen = UuidIdGen> {
    venue: Arc<Venue>,
    scheduler: Arc<LeaseScheduler<C>>,
    confirmer: ReservationConfirmer<C>,
    id_gen: G,
    hold: HoldConfig,
}

impl BoxOffice {
    /// Box office on the wall clock with random lease ids
    pub fn from_config(config: &UsherConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.venue.build_grid()?;
        Ok(Self::new(
            Venue::anonymous(grid),
            SystemClock,
            UuidIdGen,
            config.hold.clone(),
        ))
    }
}

impl<C: Clock, G: IdGen> BoxOffice<C, G> {
    pub fn new(venue: Arc<Venue>, clock: C, id_gen: G, hold: HoldConfig) -> Self {
        let scheduler =
            Arc::new(LeaseScheduler::new(clock).with_settled_retention(hold.settled_retention));
        Self {
            confirmer: ReservationConfirmer::new(Arc::clone(&scheduler)),
            venue,
            scheduler,
            id_gen,
            hold,
        }
    }

    pub fn scheduler(&self) -> &Arc<LeaseScheduler<C>> {
        &self.scheduler
    }

    pub fn open_seats(&self) -> Vec<Seat> {
        self.venue.open_seats()
    }

    pub fn count_open_seats(&self) -> usize {
        self.venue.count_open_seats()
    }

    /// Copy of the current grid
    pub fn seat_map(&self) -> SeatGrid {
        self.venue.snapshot()
    }

    /// Allocate and hold `request.seats` seats for `hold_duration`
    ///
    /// The allocation and the lease registration happen under one venue lock,
    /// so a sweep never sees held seats without their lease.
    pub fn hold(&self, request: HoldRequest) -> Result<HoldReceipt, AllocationError> {
        if request.requester.trim().is_empty() {
            return Err(AllocationError::InvalidRequest {
                reason: "requester must not be empty".to_string(),
            });
        }

        let mut grid = self.venue.lock();
        let seats = allocator::allocate(&mut grid, request.seats).map_err(|e| {
            warn!(requester = %request.requester, seats = request.seats, "hold refused: {}", e);
            e
        })?;

        let lease = HoldLease::new(
            self.id_gen.next(),
            self.venue.id().clone(),
            seats.iter().map(Seat::position).collect(),
            self.hold.hold_duration,
            self.scheduler.clock(),
        )
        .with_requester(request.requester.clone());
        let lease_id = lease.id.clone();
        let expires_at = lease.expires_at();

        if let Err(e) = self.scheduler.register(&self.venue, lease) {
            allocator::release(&mut grid, &seats);
            return Err(e);
        }

        info!(
            lease = %lease_id,
            requester = %request.requester,
            seats = seats.len(),
            "seats held"
        );
        Ok(HoldReceipt {
            lease_id,
            seats,
            expires_at,
        })
    }

    /// Reserve seats that are currently held
    pub fn confirm(&self, seats: &[Seat]) -> Result<Vec<Seat>, ReservationError> {
        self.confirmer.confirm(&self.venue, seats)
    }

    /// Reserve every seat of one active hold
    pub fn confirm_hold(&self, id: &LeaseId) -> Result<Vec<Seat>, ReservationError> {
        self.confirmer.confirm_lease(&self.venue, id)
    }

    pub fn hold_state(&self, id: &LeaseId) -> Option<LeaseState> {
        self.scheduler.state(id)
    }

    pub fn active_holds(&self) -> usize {
        self.scheduler.active_count()
    }

    /// Expire due holds now
    pub fn sweep(&self) -> Vec<ExpiredHold> {
        self.scheduler.sweep()
    }

    /// Start the background sweeper at the configured interval
    pub fn spawn_sweeper(&self) -> SweeperHandle {
        self.scheduler.spawn(self.hold.sweep_interval)
    }
}

#[cfg(test)]
#[path = "office_tests.rs"]
mod tests;
