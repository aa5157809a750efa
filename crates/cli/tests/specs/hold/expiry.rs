//! Hold expiry specs
//!
//! Runs in real time with short holds.

use crate::prelude::*;

#[test]
fn unconfirmed_holds_lapse() {
    Project::empty()
        .usher()
        .args(&[
            "--rows",
            "1",
            "--columns",
            "4",
            "simulate",
            "2",
            "2",
            "--confirm-first",
            "1",
            "--hold",
            "50ms",
            "--sweep-interval",
            "10ms",
        ])
        .passes()
        .stdout_has("hold-1: reserved (0, 0) (0, 1)\n")
        .stdout_has("expired holds: 1\n")
        .stdout_has("xx..\nopen seats: 2/4\n");
}

#[test]
fn nothing_confirmed_reopens_everything() {
    Project::empty()
        .usher()
        .args(&[
            "--rows",
            "2",
            "--columns",
            "2",
            "simulate",
            "3",
            "--hold",
            "20ms",
            "--sweep-interval",
            "10ms",
        ])
        .passes()
        .stdout_has("expired holds: 1\n")
        .stdout_has("open seats: 4/4\n");
}

#[test]
fn absurd_hold_duration_is_refused() {
    Project::empty()
        .usher()
        .args(&["simulate", "1", "--hold", "500000years"])
        .fails()
        .stderr_has("hold_duration must be at most");
}
