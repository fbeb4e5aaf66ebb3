//! `cf stages` specs

use crate::prelude::*;

#[test]
fn stages_lists_the_stock_stages_in_order() {
    cf().arg("stages").assert().success().stdout(
        predicate::str::is_match(
            r"(?s)1\. Transcribing Audio.*2\. Generating Script.*3\. Adding Smart Zooms.*4\. Creating Documentation",
        )
        .unwrap(),
    );
}

#[test]
fn stages_json_includes_ids() {
    let output = cf()
        .args(["stages", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stages: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let ids: Vec<_> = stages
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["transcribe", "script", "zooms", "docs"]);
}
