// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lease tracking and expiry sweeps
//!
//! Every hold gets its own entry keyed by [`LeaseId`], so any number of
//! holds against one venue expire on their own deadlines. A sweep reverts
//! the seats of due leases that are still held; seats a confirmation has
//! already reserved are left alone.
//!
//! Lock order is venue grid, then lease table. Confirmation holds the venue
//! lock while it reserves seats and cancels the lease, and the sweep re-checks
//! each lease under that same lock, so a seat is never both reverted and
//! reserved.

use crate::allocator::AllocationError;
use crate::clock::Clock;
use crate::grid::{SeatGrid, Venue, VenueId};
use crate::id::LeaseId;
use crate::lease::{HoldLease, LeaseEvent, LeaseInput, LeaseState};
use crate::seat::{SeatPosition, SeatStatus};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// How long settled leases stay queryable before a sweep forgets them
pub const DEFAULT_SETTLED_RETENTION: Duration = Duration::from_secs(300);

/// Seats released by one expired lease
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpiredHold {
    pub id: LeaseId,
    pub venue: VenueId,
    /// Seats that were still held and are open again
    pub released: Vec<SeatPosition>,
}

struct TrackedLease {
    lease: HoldLease,
    venue: Arc<Venue>,
}

/// Table of outstanding holds plus the sweep that expires them
pub struct LeaseScheduler<C: Clock> {
    clock: C,
    settled_retention: Duration,
    leases: Mutex<HashMap<LeaseId, TrackedLease>>,
}

impl<C: Clock> LeaseScheduler<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            settled_retention: DEFAULT_SETTLED_RETENTION,
            leases: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_settled_retention(mut self, retention: Duration) -> Self {
        self.settled_retention = retention;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn table(&self) -> MutexGuard<'_, HashMap<LeaseId, TrackedLease>> {
        self.leases.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start tracking `lease`
    ///
    /// Call while still holding the venue lock used for the allocation. An id
    /// that is already tracked is refused; the existing lease is untouched.
    pub fn register(&self, venue: &Arc<Venue>, lease: HoldLease) -> Result<(), AllocationError> {
        let mut table = self.table();
        if table.contains_key(&lease.id) {
            warn!(lease = %lease.id, "refusing to overwrite tracked lease");
            return Err(AllocationError::DuplicateLease { id: lease.id });
        }
        debug!(
            lease = %lease.id,
            venue = %venue.id(),
            seats = lease.seats.len(),
            hold_for = ?lease.hold_for,
            "lease registered"
        );
        table.insert(
            lease.id.clone(),
            TrackedLease {
                lease,
                venue: Arc::clone(venue),
            },
        );
        Ok(())
    }

    /// Mark a lease confirmed so no sweep will touch its seats
    ///
    /// Only the confirmer calls this, under the venue lock and after the
    /// lease's seats are reserved. Idempotent. Returns the lease's state
    /// afterwards, or `None` if the id is unknown. An already expired lease
    /// stays expired.
    pub(crate) fn cancel(&self, id: &LeaseId) -> Option<LeaseState> {
        let mut table = self.table();
        let tracked = table.get_mut(id)?;
        let (next, event) = tracked.lease.transition(LeaseInput::Confirm, &self.clock);
        if let Some(LeaseEvent::Confirmed { id }) = &event {
            debug!(lease = %id, "lease cancelled by confirmation");
        }
        tracked.lease = next;
        Some(tracked.lease.state)
    }

    pub fn state(&self, id: &LeaseId) -> Option<LeaseState> {
        self.table().get(id).map(|t| t.lease.state)
    }

    /// Copy of the lease record
    pub fn lease(&self, id: &LeaseId) -> Option<HoldLease> {
        self.table().get(id).map(|t| t.lease.clone())
    }

    pub fn active_count(&self) -> usize {
        self.table().values().filter(|t| t.lease.is_active()).count()
    }

    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    /// Active leases on `venue` that share a seat with `touched` and whose
    /// seats are now all reserved in `grid`
    pub(crate) fn settled_by(
        &self,
        venue: &VenueId,
        grid: &SeatGrid,
        touched: &[SeatPosition],
    ) -> Vec<LeaseId> {
        self.table()
            .values()
            .map(|t| &t.lease)
            .filter(|lease| lease.is_active() && &lease.venue == venue)
            .filter(|lease| touched.iter().any(|p| lease.covers(*p)))
            .filter(|lease| {
                lease.seats.iter().all(|p| {
                    matches!(grid.status(p.row, p.column), Ok(SeatStatus::Reserved))
                })
            })
            .map(|lease| lease.id.clone())
            .collect()
    }

    /// One pass over the table: expire due leases, then forget old settled ones
    pub fn sweep(&self) -> Vec<ExpiredHold> {
        let due: Vec<(LeaseId, Arc<Venue>)> = self
            .table()
            .values()
            .filter(|t| t.lease.is_due(&self.clock))
            .map(|t| (t.lease.id.clone(), Arc::clone(&t.venue)))
            .collect();

        let mut expired = Vec::with_capacity(due.len());
        for (id, venue) in due {
            if let Some(hold) = self.expire(&id, &venue) {
                expired.push(hold);
            }
        }

        self.purge_settled();
        expired
    }

    fn expire(&self, id: &LeaseId, venue: &Venue) -> Option<ExpiredHold> {
        let mut grid = venue.lock();
        let mut table = self.table();
        let tracked = table.get_mut(id)?;

        // A confirmation may have settled the lease since it was listed
        let (next, event) = tracked.lease.transition(LeaseInput::Tick, &self.clock);
        tracked.lease = next;
        let Some(LeaseEvent::Expired { id }) = event else {
            return None;
        };

        let mut released = Vec::new();
        for position in &tracked.lease.seats {
            if matches!(grid.status(position.row, position.column), Ok(SeatStatus::Held))
                && grid
                    .set_status(position.row, position.column, SeatStatus::Open)
                    .is_ok()
            {
                released.push(*position);
            }
        }

        info!(
            lease = %id,
            venue = %venue.id(),
            released = released.len(),
            "hold expired"
        );
        Some(ExpiredHold {
            id,
            venue: venue.id().clone(),
            released,
        })
    }

    fn purge_settled(&self) {
        let now = self.clock.now();
        let retention = self.settled_retention;
        let mut table = self.table();
        let before = table.len();
        table.retain(|_, t| match t.lease.settled_at {
            Some(settled_at) => now.saturating_duration_since(settled_at) < retention,
            None => true,
        });
        let purged = before - table.len();
        if purged > 0 {
            debug!(purged, "forgot settled leases");
        }
    }

    /// Run [`LeaseScheduler::sweep`] every `interval` on the tokio runtime
    pub fn spawn(self: &Arc<Self>, interval: Duration) -> SweeperHandle {
        let scheduler = Arc::clone(self);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        // tokio rejects a zero period
        let period = interval.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let expired = scheduler.sweep();
                        if !expired.is_empty() {
                            debug!(count = expired.len(), "sweep expired holds");
                        }
                    }
                    _ = &mut shutdown_rx => break,
                }
            }
            debug!("sweeper stopped");
        });

        info!(interval = ?period, "sweeper started");
        SweeperHandle {
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }
}

/// Handle to a running sweeper task; dropping it stops the task
pub struct SweeperHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SweeperHandle {
    /// Stop the sweeper and wait for it to finish its current pass
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("sweeper task failed: {}", e);
            }
        }
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
