//! Error reporting specs

use crate::prelude::*;

#[test]
fn unknown_subcommand_fails() {
    cf().arg("render").assert().failure();
}

#[test]
fn missing_subcommand_fails() {
    cf().assert().failure();
}

#[test]
fn bad_format_value_is_rejected() {
    cf().args(["stages", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("yaml"));
}
