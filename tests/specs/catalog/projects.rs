//! `cf projects` specs

use crate::prelude::*;

#[test]
fn projects_lists_every_project() {
    cf().arg("projects")
        .assert()
        .success()
        .stdout(predicate::str::contains("Product Onboarding Tutorial"))
        .stdout(predicate::str::contains("Settings Configuration"));
}

#[test]
fn search_is_case_insensitive() {
    cf().args(["projects", "--search", "api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API Integration Guide"))
        .stdout(predicate::str::contains("Onboarding").not());
}

#[test]
fn search_without_matches_says_so() {
    cf().args(["projects", "--search", "zzz"])
        .assert()
        .success()
        .stdout("No projects match 'zzz'\n");
}

#[test]
fn projects_json_carries_status() {
    let output = cf()
        .args(["projects", "--search", "settings", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let projects: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(projects[0]["status"], "draft");
    assert_eq!(projects[0]["has_documentation"], false);
}
