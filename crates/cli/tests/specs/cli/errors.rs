//! CLI error specs
//!
//! Bad input exits non-zero with a message on stderr.

use crate::prelude::*;

#[test]
fn unknown_command_fails() {
    Project::empty().usher().args(&["sell"]).fails();
}

#[test]
fn hold_without_counts_fails() {
    Project::empty()
        .usher()
        .args(&["hold"])
        .fails()
        .stderr_has("<COUNTS>");
}

#[test]
fn non_numeric_count_fails() {
    Project::empty().usher().args(&["hold", "two"]).fails();
}

#[test]
fn zero_rows_fails() {
    Project::empty()
        .usher()
        .args(&["--rows", "0", "map"])
        .fails()
        .stderr_has("invalid venue");
}

#[test]
fn missing_config_file_fails() {
    Project::empty()
        .usher()
        .args(&["--config", "nope.toml", "map"])
        .fails()
        .stderr_has("nope.toml");
}
