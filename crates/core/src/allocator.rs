// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Best-fit contiguous seat allocation
//!
//! Rows are scanned from the back of the venue (highest index) to the front.
//! A row satisfies the request on its own when it has a cluster of open seats
//! at least as large as what is still needed: an exact-size cluster wins,
//! otherwise the smallest larger cluster is used. When no row can do that,
//! the widest cluster seen during the pass is taken whole and the pass is
//! repeated for the remainder.
//!
//! Seats are marked held as they are chosen, so later steps of the same call
//! see the updated grid. Callers sharing a grid across threads must hold the
//! venue lock for the whole call.

use crate::grid::{GridError, SeatGrid};
use crate::id::LeaseId;
use crate::seat::{Seat, SeatStatus};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("invalid grid: {0}")]
    InvalidGrid(#[from] GridError),

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("requested {requested} seats but only {available} are open")]
    InsufficientCapacity { requested: usize, available: usize },

    #[error("allocation made no progress with {remaining} seats still needed")]
    Stalled { remaining: usize },

    #[error("lease {id} is already tracked")]
    DuplicateLease { id: LeaseId },
}

/// A maximal run of open seats within one row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cluster {
    pub start: usize,
    pub len: usize,
}

/// Clusters of `row`, left to right
pub fn row_clusters(grid: &SeatGrid, row: usize) -> Result<Vec<Cluster>, GridError> {
    let statuses = grid.row(row)?;
    let mut clusters = Vec::new();
    let mut run_start = None;

    for (column, status) in statuses.iter().enumerate() {
        match (status.is_open(), run_start) {
            (true, None) => run_start = Some(column),
            (false, Some(start)) => {
                clusters.push(Cluster {
                    start,
                    len: column - start,
                });
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        clusters.push(Cluster {
            start,
            len: statuses.len() - start,
        });
    }

    Ok(clusters)
}

/// Exact-size cluster first, else the smallest strictly larger one.
/// Ties go to the leftmost cluster.
fn best_fit(clusters: &[Cluster], need: usize) -> Option<Cluster> {
    clusters
        .iter()
        .find(|c| c.len == need)
        .or_else(|| {
            clusters
                .iter()
                .filter(|c| c.len > need)
                .min_by_key(|c| c.len)
        })
        .copied()
}

fn hold_run(
    grid: &mut SeatGrid,
    row: usize,
    start: usize,
    count: usize,
    held: &mut Vec<Seat>,
) -> Result<(), GridError> {
    for column in start..start + count {
        grid.set_status(row, column, SeatStatus::Held)?;
        held.push(Seat::new(row, column, SeatStatus::Held));
    }
    Ok(())
}

/// Return `held` seats to open
pub(crate) fn release(grid: &mut SeatGrid, held: &[Seat]) {
    for seat in held {
        if let Err(e) = grid.set_status(seat.row, seat.column, SeatStatus::Open) {
            error!(row = seat.row, column = seat.column, "failed to release seat: {}", e);
        }
    }
}

/// Hold `requested` seats in `grid`
///
/// Returns the held seats in the order they were taken. On any error the
/// grid is left as it was.
pub fn allocate(grid: &mut SeatGrid, requested: usize) -> Result<Vec<Seat>, AllocationError> {
    if requested == 0 {
        return Err(AllocationError::InvalidRequest {
            reason: "requested seat count must be positive".to_string(),
        });
    }
    let available = grid.count_open_seats();
    if requested > available {
        return Err(AllocationError::InsufficientCapacity {
            requested,
            available,
        });
    }

    let mut held = Vec::with_capacity(requested);
    match fill(grid, requested, &mut held) {
        Ok(()) => Ok(held),
        Err(e) => {
            release(grid, &held);
            Err(e)
        }
    }
}

fn fill(grid: &mut SeatGrid, requested: usize, held: &mut Vec<Seat>) -> Result<(), AllocationError> {
    while held.len() < requested {
        let before = held.len();
        // (row, cluster) of the widest cluster seen this pass; first seen wins ties
        let mut widest: Option<(usize, Cluster)> = None;

        for row in (0..grid.row_count()).rev() {
            let need = requested - held.len();
            let clusters = row_clusters(grid, row)?;

            if let Some(cluster) = best_fit(&clusters, need) {
                debug!(row, start = cluster.start, len = cluster.len, need, "row fits request");
                hold_run(grid, row, cluster.start, need, held)?;
                return Ok(());
            }

            for cluster in clusters {
                if widest.map_or(true, |(_, w)| cluster.len > w.len) {
                    widest = Some((row, cluster));
                }
            }
        }

        if let Some((row, cluster)) = widest {
            let take = (requested - held.len()).min(cluster.len);
            debug!(row, start = cluster.start, take, "splitting request across rows");
            hold_run(grid, row, cluster.start, take, held)?;
        }

        if held.len() == before {
            let remaining = requested - held.len();
            error!(remaining, "seat allocation stalled despite capacity check");
            return Err(AllocationError::Stalled { remaining });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "allocator_tests.rs"]
mod tests;
