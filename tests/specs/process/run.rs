//! `cf process` run specs

use crate::prelude::*;

#[test]
fn process_runs_every_stage_in_order() {
    let scratch = Scratch::new();
    let config = scratch.fast_config();

    let output = scratch
        .cf()
        .args(["process", "--seed", "7", "--id", "demo-1", "--config"])
        .arg(&config)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    let order = [
        "[1/4] Transcribing Audio...",
        "done: Transcribing Audio (25% overall)",
        "[2/4] Generating Script...",
        "done: Generating Script (50% overall)",
        "[3/4] Adding Smart Zooms...",
        "done: Adding Smart Zooms (75% overall)",
        "[4/4] Creating Documentation...",
        "done: Creating Documentation (100% overall)",
        "Processing Complete!",
    ];
    let mut from = 0;
    for line in order {
        let Some(at) = stdout[from..].find(line) else {
            panic!("missing or out of order: {line}\n{stdout}");
        };
        from += at + line.len();
    }
    assert!(stdout.starts_with("Processing demo-1 (4 stages)"));
    assert!(stdout.contains("Overall progress: 100%"));
    assert!(stdout.contains("View results: /preview/demo-1"));
}

#[test]
fn generated_run_ids_are_used_in_the_results_route() {
    let scratch = Scratch::new();
    let config = scratch.fast_config();

    scratch
        .cf()
        .arg("process")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"View results: /preview/run-[0-9a-f]{8}\n").unwrap());
}

#[test]
fn json_format_prints_the_final_snapshot() {
    let scratch = Scratch::new();
    let config = scratch.fast_config();

    let output = scratch
        .cf()
        .args(["process", "--format", "json", "--id", "clip-3", "--config"])
        .arg(&config)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let snapshot: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(snapshot["run_id"], "clip-3");
    assert_eq!(snapshot["state"], "complete");
    assert_eq!(snapshot["is_complete"], true);
    assert_eq!(snapshot["overall_progress"], 100.0);
    let stages = snapshot["stages"].as_array().unwrap();
    assert_eq!(stages.len(), 4);
    for stage in stages {
        assert_eq!(stage["status"], "completed");
        assert_eq!(stage["progress"], 100.0);
    }
}

#[test]
fn logs_go_to_stderr_only() {
    let scratch = Scratch::new();
    let config = scratch.fast_config();

    scratch
        .cf()
        .env("CF_LOG", "info")
        .args(["process", "--format", "json", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stderr(predicate::str::contains("pipeline run complete"));
}
