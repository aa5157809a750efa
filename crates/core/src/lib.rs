// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! usher-core: seat allocation and timed holds for the usher CLI
//!
//! This crate provides:
//! - A seat grid shared behind a per-venue lock
//! - Best-fit contiguous allocation, back rows first
//! - Hold leases that expire on a timed sweep unless confirmed
//! - All-or-nothing confirmation of held seats

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod clock;
pub mod id;

// Seats and grids
pub mod seat;
pub mod grid;

// Holds (order matters for dependencies)
pub mod allocator;
pub mod lease;
pub mod scheduler;
pub mod reservation;

pub mod config;
pub mod office;

// Re-exports
pub use allocator::{allocate, AllocationError, Cluster};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, HoldConfig, UsherConfig, VenueConfig};
pub use grid::{GridError, SeatGrid, Venue, VenueId};
pub use id::{IdGen, LeaseId, SequentialIdGen, UuidIdGen};
pub use lease::{HoldLease, LeaseEvent, LeaseInput, LeaseState};
pub use office::{BoxOffice, HoldReceipt, HoldRequest};
pub use reservation::{reserve_held, ReservationConfirmer, ReservationError};
pub use scheduler::{ExpiredHold, LeaseScheduler, SweeperHandle};
pub use seat::{Seat, SeatPosition, SeatStatus};
