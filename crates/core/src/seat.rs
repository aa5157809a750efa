// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Seat snapshots and seat status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a single seat
///
/// Seat maps render these as `.` (open), `h` (held) and `x` (reserved).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    #[default]
    Open,
    Held,
    Reserved,
}

impl SeatStatus {
    pub fn symbol(self) -> char {
        match self {
            SeatStatus::Open => '.',
            SeatStatus::Held => 'h',
            SeatStatus::Reserved => 'x',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(SeatStatus::Open),
            'h' | 'H' => Some(SeatStatus::Held),
            'x' | 'X' => Some(SeatStatus::Reserved),
            _ => None,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, SeatStatus::Open)
    }
}

impl fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeatStatus::Open => "open",
            SeatStatus::Held => "held",
            SeatStatus::Reserved => "reserved",
        };
        f.write_str(name)
    }
}

/// Zero-based coordinates of a seat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatPosition {
    pub row: usize,
    pub column: usize,
}

impl SeatPosition {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A seat as observed at one moment; never a reference back into the grid
///
/// Equality covers position and status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat {
    pub row: usize,
    pub column: usize,
    pub status: SeatStatus,
}

impl Seat {
    pub fn new(row: usize, column: usize, status: SeatStatus) -> Self {
        Self {
            row,
            column,
            status,
        }
    }

    pub fn position(&self) -> SeatPosition {
        SeatPosition::new(self.row, self.column)
    }

    /// Same seat with a different status
    pub fn with_status(self, status: SeatStatus) -> Self {
        Self { status, ..self }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} seat {} ({})", self.row, self.column, self.status)
    }
}
