// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `usher simulate` - Let unconfirmed holds run out in real time

use super::hold::{open_office, place_holds};
use crate::output::{self, HoldLine, HoldReport, MapView, OutputFormat};
use anyhow::Result;
use clap::Args;
use std::time::Duration;
use tracing::info;
use usher_core::{LeaseState, UsherConfig};

#[derive(Args)]
pub struct SimulateArgs {
    /// Seats per hold, taken in order
    #[arg(required = true, num_args = 1..)]
    pub counts: Vec<usize>,

    /// Confirm this many of the successful holds; the rest expire
    #[arg(long, default_value_t = 0)]
    pub confirm_first: usize,

    /// Override the configured hold duration (e.g. "200ms")
    #[arg(long, value_parser = humantime::parse_duration)]
    pub hold: Option<Duration>,

    /// Override the configured sweep interval
    #[arg(long, value_parser = humantime::parse_duration)]
    pub sweep_interval: Option<Duration>,

    /// Name recorded on each hold
    #[arg(long, default_value = "usher")]
    pub requester: String,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub async fn simulate(args: SimulateArgs, config: &UsherConfig) -> Result<()> {
    let mut config = config.clone();
    if let Some(hold) = args.hold {
        config.hold = config.hold.with_hold_duration(hold);
    }
    if let Some(interval) = args.sweep_interval {
        config.hold = config.hold.with_sweep_interval(interval);
    }
    config.validate()?;

    let office = open_office(&config)?;
    let sweeper = office.spawn_sweeper();
    let holds = place_holds(&office, &args.counts, &args.requester, args.confirm_first)?;

    // Two sweep periods past the deadline so the last due hold is seen
    let wait = config
        .hold
        .hold_duration
        .saturating_add(config.hold.sweep_interval.saturating_mul(2));
    info!(wait = %humantime::format_duration(wait), "waiting for holds to lapse");
    tokio::time::sleep(wait).await;
    sweeper.shutdown().await;

    let expired = holds
        .iter()
        .filter_map(|line| match line {
            HoldLine::Held { receipt, .. } => office.hold_state(&receipt.lease_id),
            HoldLine::Refused { .. } => None,
        })
        .filter(|state| *state == LeaseState::Expired)
        .count();
    let report = HoldReport {
        holds,
        expired: Some(expired),
        venue: MapView::from(&office.seat_map()),
    };
    output::print(&report, args.format)
}
