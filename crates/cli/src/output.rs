// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use usher_core::{HoldReceipt, SeatGrid};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", value),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// Seat map with its open count
#[derive(Serialize)]
pub struct MapView {
    rows: usize,
    columns: usize,
    capacity: usize,
    open: usize,
    /// Front row first
    map: Vec<String>,
}

impl From<&SeatGrid> for MapView {
    fn from(grid: &SeatGrid) -> Self {
        Self {
            rows: grid.row_count(),
            columns: grid.column_count(),
            capacity: grid.capacity(),
            open: grid.count_open_seats(),
            map: grid.render().lines().map(str::to_string).collect(),
        }
    }
}

impl fmt::Display for MapView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.map {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "open seats: {}/{}", self.open, self.capacity)
    }
}

/// One line per attempted hold
#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum HoldLine {
    Held {
        requested: usize,
        #[serde(flatten)]
        receipt: HoldReceipt,
        confirmed: bool,
    },
    Refused {
        requested: usize,
        error: String,
    },
}

impl fmt::Display for HoldLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoldLine::Held {
                receipt, confirmed, ..
            } => {
                let seats: Vec<_> = receipt.seats.iter().map(|s| s.position().to_string()).collect();
                let verb = if *confirmed { "reserved" } else { "held" };
                writeln!(f, "{}: {} {}", receipt.lease_id, verb, seats.join(" "))
            }
            HoldLine::Refused { requested, error } => {
                writeln!(f, "refused {}: {}", requested, error)
            }
        }
    }
}

/// Holds followed by the resulting map
#[derive(Serialize)]
pub struct HoldReport {
    pub holds: Vec<HoldLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<usize>,
    pub venue: MapView,
}

impl fmt::Display for HoldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hold in &self.holds {
            write!(f, "{}", hold)?;
        }
        if let Some(expired) = self.expired {
            writeln!(f, "expired holds: {}", expired)?;
        }
        write!(f, "{}", self.venue)
    }
}

impl HoldReport {
    pub fn refused(&self) -> usize {
        self.holds
            .iter()
            .filter(|h| matches!(h, HoldLine::Refused { .. }))
            .count()
    }
}
