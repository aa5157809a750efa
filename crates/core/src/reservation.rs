// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turning holds into reservations
//!
//! Confirmation is all-or-nothing: every seat must currently be held in the
//! grid, or nothing changes. Once seats are reserved, any lease they settle
//! is cancelled under the same venue lock, so the expiry sweep never sees it
//! as due.

use crate::clock::Clock;
use crate::grid::{GridError, SeatGrid, Venue};
use crate::id::LeaseId;
use crate::lease::LeaseState;
use crate::scheduler::LeaseScheduler;
use crate::seat::{Seat, SeatStatus};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    #[error("no seats to reserve")]
    EmptyRequest,

    #[error("seat ({row}, {column}) is {status}, not held")]
    InvalidReservation {
        row: usize,
        column: usize,
        status: SeatStatus,
    },

    #[error("seat ({row}, {column}) is listed more than once")]
    DuplicateSeat { row: usize, column: usize },

    #[error("unknown hold {id}")]
    UnknownLease { id: LeaseId },

    #[error("hold {id} is already {state}")]
    LeaseNotActive { id: LeaseId, state: LeaseState },

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Reserve `seats` if every one of them is held in `grid`
///
/// The status carried by each input seat is ignored; only the grid counts.
/// Each position may appear once. Returns the seats in input order with
/// status `Reserved`.
pub fn reserve_held(grid: &mut SeatGrid, seats: &[Seat]) -> Result<Vec<Seat>, ReservationError> {
    if seats.is_empty() {
        return Err(ReservationError::EmptyRequest);
    }

    let mut seen = HashSet::with_capacity(seats.len());
    for seat in seats {
        if !seen.insert(seat.position()) {
            return Err(ReservationError::DuplicateSeat {
                row: seat.row,
                column: seat.column,
            });
        }
        let status = grid.status(seat.row, seat.column)?;
        if status != SeatStatus::Held {
            return Err(ReservationError::InvalidReservation {
                row: seat.row,
                column: seat.column,
                status,
            });
        }
    }

    let mut reserved = Vec::with_capacity(seats.len());
    for seat in seats {
        grid.set_status(seat.row, seat.column, SeatStatus::Reserved)?;
        reserved.push(seat.with_status(SeatStatus::Reserved));
    }
    Ok(reserved)
}

/// Confirms holds and settles their leases
pub struct ReservationConfirmer<C: Clock> {
    scheduler: Arc<LeaseScheduler<C>>,
}

impl<C: Clock> ReservationConfirmer<C> {
    pub fn new(scheduler: Arc<LeaseScheduler<C>>) -> Self {
        Self { scheduler }
    }

    /// Reserve `seats`, cancelling every lease left with nothing but reserved seats
    pub fn confirm(&self, venue: &Venue, seats: &[Seat]) -> Result<Vec<Seat>, ReservationError> {
        let mut grid = venue.lock();
        let reserved = reserve_held(&mut grid, seats).map_err(|e| {
            warn!(venue = %venue.id(), "confirmation rejected: {}", e);
            e
        })?;

        let touched: Vec<_> = reserved.iter().map(Seat::position).collect();
        for id in self.scheduler.settled_by(venue.id(), &grid, &touched) {
            self.scheduler.cancel(&id);
        }

        info!(venue = %venue.id(), seats = reserved.len(), "seats reserved");
        Ok(reserved)
    }

    /// Reserve exactly the seats of one still-active lease
    pub fn confirm_lease(&self, venue: &Venue, id: &LeaseId) -> Result<Vec<Seat>, ReservationError> {
        let mut grid = venue.lock();
        let lease = self
            .scheduler
            .lease(id)
            .filter(|lease| &lease.venue == venue.id())
            .ok_or_else(|| ReservationError::UnknownLease { id: id.clone() })?;
        if !lease.is_active() {
            warn!(lease = %id, state = %lease.state, "confirmation of settled hold");
            return Err(ReservationError::LeaseNotActive {
                id: id.clone(),
                state: lease.state,
            });
        }

        let seats: Vec<Seat> = lease
            .seats
            .iter()
            .map(|p| Seat::new(p.row, p.column, SeatStatus::Held))
            .collect();
        let reserved = reserve_held(&mut grid, &seats)?;
        self.scheduler.cancel(id);

        info!(lease = %id, venue = %venue.id(), seats = reserved.len(), "hold confirmed");
        Ok(reserved)
    }
}

#[cfg(test)]
#[path = "reservation_tests.rs"]
mod tests;
