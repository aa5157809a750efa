//! Seat map specs

use crate::prelude::*;

#[test]
fn default_venue_is_ten_by_ten() {
    Project::empty()
        .usher()
        .args(&["map"])
        .passes()
        .stdout_has("..........\n")
        .stdout_has("open seats: 100/100");
}

#[test]
fn dimensions_come_from_flags() {
    Project::empty()
        .usher()
        .args(&["--rows", "3", "--columns", "4", "map"])
        .passes()
        .stdout_eq("....\n....\n....\nopen seats: 12/12\n");
}

#[test]
fn json_map_reports_counts() {
    Project::empty()
        .usher()
        .args(&["--rows", "2", "--columns", "2", "map", "--format", "json"])
        .passes()
        .stdout_has("\"rows\": 2")
        .stdout_has("\"open\": 4");
}
