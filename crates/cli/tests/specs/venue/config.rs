//! Config file specs

use crate::prelude::*;

#[test]
fn config_layout_sets_the_map() {
    let temp = Project::empty();
    temp.file("usher.toml", SOLD_FRONT_CONFIG);

    temp.usher()
        .args(&["--config", "usher.toml", "map"])
        .passes()
        .stdout_eq("xxx\n...\nopen seats: 3/6\n");
}

#[test]
fn holds_skip_reserved_seats_from_config() {
    let temp = Project::empty();
    temp.file("usher.toml", SOLD_FRONT_CONFIG);

    temp.usher()
        .args(&["--config", "usher.toml", "hold", "2"])
        .passes()
        .stdout_eq("hold-1: held (1, 0) (1, 1)\nxxx\nhh.\nopen seats: 1/6\n");
}

#[test]
fn flags_override_config_layout() {
    let temp = Project::empty();
    temp.file("usher.toml", SOLD_FRONT_CONFIG);

    temp.usher()
        .args(&["--config", "usher.toml", "--rows", "1", "--columns", "2", "map"])
        .passes()
        .stdout_eq("..\nopen seats: 2/2\n");
}

#[test]
fn zero_hold_duration_is_rejected() {
    let temp = Project::empty();
    temp.file("usher.toml", "[hold]\nhold_duration = \"0s\"\n");

    temp.usher()
        .args(&["--config", "usher.toml", "map"])
        .fails()
        .stderr_has("hold_duration must be greater than zero");
}
