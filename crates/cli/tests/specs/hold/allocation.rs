//! Hold allocation specs
//!
//! Holds fill from the back row, preferring one contiguous block.

use crate::prelude::*;

#[test]
fn four_seats_in_seven_by_seven() {
    Project::empty()
        .usher()
        .args(&["--rows", "7", "--columns", "7", "hold", "4"])
        .passes()
        .stdout_eq(concat!(
            "hold-1: held (6, 0) (6, 1) (6, 2) (6, 3)\n",
            ".......\n",
            ".......\n",
            ".......\n",
            ".......\n",
            ".......\n",
            ".......\n",
            "hhhh...\n",
            "open seats: 45/49\n",
        ));
}

#[test]
fn six_seats_in_five_by_five_spill_forward() {
    Project::empty()
        .usher()
        .args(&["--rows", "5", "--columns", "5", "hold", "6"])
        .passes()
        .stdout_has("hold-1: held (4, 0) (4, 1) (4, 2) (4, 3) (4, 4) (3, 0)\n")
        .stdout_has("h....\nhhhhh\nopen seats: 19/25\n");
}

#[test]
fn later_holds_take_the_best_fit() {
    Project::empty()
        .usher()
        .args(&["--rows", "1", "--columns", "6", "hold", "2", "3"])
        .passes()
        .stdout_has("hold-1: held (0, 0) (0, 1)\n")
        .stdout_has("hold-2: held (0, 2) (0, 3) (0, 4)\n")
        .stdout_has("hhhhh.\n");
}

#[test]
fn confirm_reserves_seats() {
    Project::empty()
        .usher()
        .args(&["--rows", "2", "--columns", "3", "hold", "3", "--confirm"])
        .passes()
        .stdout_eq("hold-1: reserved (1, 0) (1, 1) (1, 2)\n...\nxxx\nopen seats: 3/6\n");
}

#[test]
fn oversized_hold_is_refused() {
    Project::empty()
        .usher()
        .args(&["--rows", "2", "--columns", "3", "hold", "4", "3"])
        .fails()
        .stdout_has("hold-1: held")
        .stdout_has("refused 3: requested 3 seats but only 2 are open")
        .stderr_has("1 of 2 holds refused");
}

#[test]
fn zero_seat_hold_is_refused() {
    Project::empty()
        .usher()
        .args(&["hold", "0"])
        .fails()
        .stdout_has("refused 0: invalid request")
        .stdout_lacks("hold-1");
}

#[test]
fn json_hold_lists_outcomes() {
    Project::empty()
        .usher()
        .args(&["--rows", "1", "--columns", "2", "hold", "1", "--format", "json"])
        .passes()
        .stdout_has("\"outcome\": \"held\"")
        .stdout_has("\"lease_id\": \"hold-1\"")
        .stdout_has("\"confirmed\": false");
}
