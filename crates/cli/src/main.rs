// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! usher - seat holds and reservations

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{hold, map, simulate};
use std::path::PathBuf;
use usher_core::UsherConfig;

#[derive(Parser)]
#[command(name = "usher", version, about = "Usher - seat holds that expire unless confirmed")]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Number of rows, overriding the config
    #[arg(long, global = true)]
    rows: Option<usize>,

    /// Seats per row, overriding the config
    #[arg(long, global = true)]
    columns: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the seat map
    Map(map::MapArgs),
    /// Hold seats on a fresh venue
    Hold(hold::HoldArgs),
    /// Hold seats and let unconfirmed holds expire in real time
    Simulate(simulate::SimulateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Map(args) => map::map(args, &config),
        Commands::Hold(args) => hold::hold(args, &config),
        Commands::Simulate(args) => simulate::simulate(args, &config).await,
    }
}

/// Logs go to stderr so stdout stays parseable; `RUST_LOG` overrides the level
fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn load_config(cli: &Cli) -> Result<UsherConfig> {
    let mut config = match &cli.config {
        Some(path) => UsherConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => UsherConfig::default(),
    };

    // Explicit dimensions replace any configured layout
    if cli.rows.is_some() || cli.columns.is_some() {
        config.venue.layout = None;
    }
    if let Some(rows) = cli.rows {
        config.venue.rows = rows;
    }
    if let Some(columns) = cli.columns {
        config.venue.columns = columns;
    }

    config.validate()?;
    Ok(config)
}
