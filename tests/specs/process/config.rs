//! `cf process` config specs

use crate::prelude::*;

#[test]
fn missing_config_file_fails_with_a_hint() {
    let scratch = Scratch::new();
    let missing = scratch.path().join("nope.toml");

    scratch
        .cf()
        .arg("process")
        .arg("--config")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read config file"))
        .stderr(predicate::str::contains("= help:"));
}

#[test]
fn invalid_values_are_reported() {
    let scratch = Scratch::new();
    let config = scratch.file("bad.toml", "display_cap = 120.0\n");

    scratch
        .cf()
        .arg("process")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid values"))
        .stderr(predicate::str::contains("display_cap"));
}

#[test]
fn unknown_keys_are_rejected() {
    let scratch = Scratch::new();
    let config = scratch.file("typo.toml", "tick_intervall = \"1ms\"\n");

    scratch
        .cf()
        .arg("process")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid TOML"));
}

#[test]
fn config_env_var_is_honored() {
    let scratch = Scratch::new();
    let config = scratch.fast_config();

    scratch
        .cf()
        .env("CF_CONFIG", &config)
        .args(["process", "--id", "env-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("View results: /preview/env-run"));
}

#[test]
fn config_env_var_pointing_nowhere_fails() {
    let scratch = Scratch::new();

    scratch
        .cf()
        .env("CF_CONFIG", scratch.path().join("gone.toml"))
        .arg("process")
        .assert()
        .failure()
        .stderr(predicate::str::contains("gone.toml"));
}
