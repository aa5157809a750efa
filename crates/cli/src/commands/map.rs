// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `usher map` - Show the seat map

use crate::output::{self, MapView, OutputFormat};
use anyhow::Result;
use clap::Args;
use usher_core::UsherConfig;

#[derive(Args)]
pub struct MapArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub fn map(args: MapArgs, config: &UsherConfig) -> Result<()> {
    let grid = config.venue.build_grid()?;
    output::print(&MapView::from(&grid), args.format)
}
