//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    Project::empty()
        .usher()
        .args(&["--help"])
        .passes()
        .stdout_has("map")
        .stdout_has("hold")
        .stdout_has("simulate");
}

#[test]
fn hold_help_describes_confirm() {
    Project::empty()
        .usher()
        .args(&["hold", "--help"])
        .passes()
        .stdout_has("--confirm");
}
