// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Seat grid and the shared venue handle
//!
//! [`SeatGrid`] owns the status matrix and checks every coordinate. [`Venue`]
//! gives the grid an identity and a lock so allocations, confirmations and
//! expiry sweeps from different threads are serialized.

use crate::seat::{Seat, SeatStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Rows in a venue created without explicit dimensions
pub const DEFAULT_ROWS: usize = 10;
/// Columns in a venue created without explicit dimensions
pub const DEFAULT_COLUMNS: usize = 10;
/// Largest number of seats one grid may hold
pub const MAX_SEATS: usize = 1 << 24;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be at least 1x1, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("a {rows}x{columns} grid exceeds the {max} seat limit")]
    TooLarge {
        rows: usize,
        columns: usize,
        max: usize,
    },

    #[error("seat ({row}, {column}) is outside the {rows}x{columns} grid")]
    OutOfRange {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("unknown seat symbol {symbol:?} at ({row}, {column})")]
    UnknownSymbol {
        row: usize,
        column: usize,
        symbol: char,
    },

    #[error("layout row {row} has {found} seats, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A `rows x columns` matrix of seat statuses, stored row-major
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatGrid {
    rows: usize,
    columns: usize,
    cells: Vec<SeatStatus>,
}

impl SeatGrid {
    /// All-open grid
    pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
        Self::filled(rows, columns, SeatStatus::Open)
    }

    /// Grid with every seat set to `status`
    pub fn filled(rows: usize, columns: usize, status: SeatStatus) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::InvalidDimensions { rows, columns });
        }
        let seats = rows
            .checked_mul(columns)
            .filter(|seats| *seats <= MAX_SEATS)
            .ok_or(GridError::TooLarge {
                rows,
                columns,
                max: MAX_SEATS,
            })?;
        tracing::debug!(rows, columns, %status, "creating seat grid");
        Ok(Self {
            rows,
            columns,
            cells: vec![status; seats],
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    fn index(&self, row: usize, column: usize) -> Result<usize, GridError> {
        if row >= self.rows || column >= self.columns {
            return Err(GridError::OutOfRange {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(row * self.columns + column)
    }

    pub fn status(&self, row: usize, column: usize) -> Result<SeatStatus, GridError> {
        let index = self.index(row, column)?;
        Ok(self.cells[index])
    }

    pub fn set_status(
        &mut self,
        row: usize,
        column: usize,
        status: SeatStatus,
    ) -> Result<(), GridError> {
        let index = self.index(row, column)?;
        self.cells[index] = status;
        Ok(())
    }

    pub fn seat(&self, row: usize, column: usize) -> Result<Seat, GridError> {
        Ok(Seat::new(row, column, self.status(row, column)?))
    }

    /// Every seat, row ascending then column ascending
    pub fn seats(&self) -> impl Iterator<Item = Seat> + '_ {
        self.cells.iter().enumerate().map(|(index, status)| {
            Seat::new(index / self.columns, index % self.columns, *status)
        })
    }

    /// Open seats in row-major order
    ///
    /// Allocation tests rely on this order, so it is part of the contract.
    pub fn open_seats(&self) -> Vec<Seat> {
        self.seats().filter(|seat| seat.status.is_open()).collect()
    }

    pub fn count(&self, status: SeatStatus) -> usize {
        self.cells.iter().filter(|s| **s == status).count()
    }

    pub fn count_open_seats(&self) -> usize {
        self.count(SeatStatus::Open)
    }

    /// Statuses of one row, left to right
    pub fn row(&self, row: usize) -> Result<&[SeatStatus], GridError> {
        let start = self.index(row, 0)?;
        Ok(&self.cells[start..start + self.columns])
    }

    /// Seat map, one line per row, front row first
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.columns + 1));
        for row in self.cells.chunks(self.columns) {
            out.extend(row.iter().map(|s| s.symbol()));
            out.push('\n');
        }
        out
    }
}

impl Default for SeatGrid {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            cells: vec![SeatStatus::Open; DEFAULT_ROWS * DEFAULT_COLUMNS],
        }
    }
}

impl fmt::Display for SeatGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Parses a seat map as produced by [`SeatGrid::render`]
///
/// Blank lines and surrounding whitespace are ignored.
impl FromStr for SeatGrid {
    type Err = GridError;

    fn from_str(layout: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let rows = lines.len();
        let columns = lines.first().map_or(0, |line| line.chars().count());
        let mut grid = SeatGrid::new(rows, columns)?;

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != columns {
                return Err(GridError::RaggedRow {
                    row,
                    expected: columns,
                    found,
                });
            }
            for (column, symbol) in line.chars().enumerate() {
                let status = SeatStatus::from_symbol(symbol).ok_or(GridError::UnknownSymbol {
                    row,
                    column,
                    symbol,
                })?;
                grid.set_status(row, column, status)?;
            }
        }

        Ok(grid)
    }
}

/// Identity of one venue grid
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VenueId(pub String);

impl VenueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared, lock-guarded seat grid
///
/// Any code that reads a status and then writes based on it must do both
/// under one [`Venue::lock`] guard.
#[derive(Debug)]
pub struct Venue {
    id: VenueId,
    grid: Mutex<SeatGrid>,
}

impl Venue {
    pub fn new(id: VenueId, grid: SeatGrid) -> Arc<Self> {
        Arc::new(Self {
            id,
            grid: Mutex::new(grid),
        })
    }

    /// Venue with a random id
    pub fn anonymous(grid: SeatGrid) -> Arc<Self> {
        Self::new(VenueId(uuid::Uuid::new_v4().to_string()), grid)
    }

    pub fn id(&self) -> &VenueId {
        &self.id
    }

    pub fn lock(&self) -> MutexGuard<'_, SeatGrid> {
        self.grid.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Copy of the grid as it is right now
    pub fn snapshot(&self) -> SeatGrid {
        self.lock().clone()
    }

    pub fn open_seats(&self) -> Vec<Seat> {
        self.lock().open_seats()
    }

    pub fn count_open_seats(&self) -> usize {
        self.lock().count_open_seats()
    }
}

#[cfg(test)]
#[path = "grid_tests.rs"]
mod tests;
