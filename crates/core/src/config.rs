// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Venue and hold configuration
//!
//! Loaded from TOML; durations use humantime notation:
//!
//! ```toml
//! [venue]
//! rows = 7
//! columns = 7
//!
//! [hold]
//! hold_duration = "6s"
//! sweep_interval = "1s"
//! settled_retention = "5m"
//! ```

use crate::grid::{GridError, SeatGrid, DEFAULT_COLUMNS, DEFAULT_ROWS};
use crate::scheduler::DEFAULT_SETTLED_RETENTION;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Upper bound for hold and sweep durations
pub const MAX_DURATION: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid venue: {0}")]
    Venue(#[from] GridError),

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("{field} must be at most {max:?}")]
    DurationTooLong { field: &'static str, max: Duration },
}

/// Shape of the seat grid
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueConfig {
    pub rows: usize,
    pub columns: usize,
    /// Optional seat map (`.` open, `h` held, `x` reserved); overrides rows/columns
    pub layout: Option<String>,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            layout: None,
        }
    }
}

impl VenueConfig {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            layout: None,
        }
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    /// Build the initial grid
    pub fn build_grid(&self) -> Result<SeatGrid, GridError> {
        match &self.layout {
            Some(layout) => layout.parse(),
            None => SeatGrid::new(self.rows, self.columns),
        }
    }
}

/// Hold timing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldConfig {
    /// How long seats stay held without confirmation
    #[serde(with = "humantime_serde")]
    pub hold_duration: Duration,
    /// How often the sweeper looks for expired holds
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,
    /// How long settled holds remain queryable
    #[serde(with = "humantime_serde")]
    pub settled_retention: Duration,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            hold_duration: Duration::from_secs(6),
            sweep_interval: Duration::from_secs(1),
            settled_retention: DEFAULT_SETTLED_RETENTION,
        }
    }
}

impl HoldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hold_duration(mut self, duration: Duration) -> Self {
        self.hold_duration = duration;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    pub fn with_settled_retention(mut self, retention: Duration) -> Self {
        self.settled_retention = retention;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hold_duration.is_zero() {
            return Err(ConfigError::ZeroDuration {
                field: "hold_duration",
            });
        }
        if self.sweep_interval.is_zero() {
            return Err(ConfigError::ZeroDuration {
                field: "sweep_interval",
            });
        }
        for (field, duration) in [
            ("hold_duration", self.hold_duration),
            ("sweep_interval", self.sweep_interval),
        ] {
            if duration > MAX_DURATION {
                return Err(ConfigError::DurationTooLong {
                    field,
                    max: MAX_DURATION,
                });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsherConfig {
    pub venue: VenueConfig,
    pub hold: HoldConfig,
}

impl UsherConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hold.validate()?;
        self.venue.build_grid()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
