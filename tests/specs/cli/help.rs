//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    cf().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("stages"))
        .stdout(predicate::str::contains("projects"));
}

#[test]
fn process_help_lists_flags() {
    cf().args(["process", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--seed"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn version_flag_prints_version() {
    cf().arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("cf "));
}
