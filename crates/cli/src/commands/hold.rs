// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `usher hold` - Hold seats on a fresh venue

use crate::output::{self, HoldLine, HoldReport, MapView, OutputFormat};
use anyhow::{bail, Result};
use clap::Args;
use usher_core::{
    BoxOffice, Clock, HoldRequest, IdGen, SequentialIdGen, SystemClock, UsherConfig, Venue,
};

#[derive(Args)]
pub struct HoldArgs {
    /// Seats per hold, taken in order
    #[arg(required = true, num_args = 1..)]
    pub counts: Vec<usize>,

    /// Confirm each hold as soon as it is made
    #[arg(long)]
    pub confirm: bool,

    /// Name recorded on each hold
    #[arg(long, default_value = "usher")]
    pub requester: String,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Box office with readable `hold-N` ids
pub fn open_office(config: &UsherConfig) -> Result<BoxOffice<SystemClock, SequentialIdGen>> {
    let grid = config.venue.build_grid()?;
    Ok(BoxOffice::new(
        Venue::anonymous(grid),
        SystemClock,
        SequentialIdGen::default(),
        config.hold.clone(),
    ))
}

/// Attempt one hold per count; `confirm_first` of the successful ones are confirmed
pub fn place_holds<C: Clock, G: IdGen>(
    office: &BoxOffice<C, G>,
    counts: &[usize],
    requester: &str,
    confirm_first: usize,
) -> Result<Vec<HoldLine>> {
    let mut lines = Vec::with_capacity(counts.len());
    let mut confirmed_so_far = 0;

    for &requested in counts {
        let receipt = match office.hold(HoldRequest::new(requester, requested)) {
            Ok(receipt) => receipt,
            Err(e) => {
                lines.push(HoldLine::Refused {
                    requested,
                    error: e.to_string(),
                });
                continue;
            }
        };

        let confirmed = confirmed_so_far < confirm_first;
        if confirmed {
            office.confirm_hold(&receipt.lease_id)?;
            confirmed_so_far += 1;
        }
        lines.push(HoldLine::Held {
            requested,
            receipt,
            confirmed,
        });
    }
    Ok(lines)
}

pub fn hold(args: HoldArgs, config: &UsherConfig) -> Result<()> {
    let office = open_office(config)?;
    let confirm_first = if args.confirm { usize::MAX } else { 0 };
    let holds = place_holds(&office, &args.counts, &args.requester, confirm_first)?;

    let report = HoldReport {
        holds,
        expired: None,
        venue: MapView::from(&office.seat_map()),
    };
    output::print(&report, args.format)?;

    let refused = report.refused();
    if refused > 0 {
        bail!("{} of {} holds refused", refused, args.counts.len());
    }
    Ok(())
}
