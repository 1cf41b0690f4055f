use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn test_cli_single_paper() {
    let mut cmd = Command::cargo_bin("citemap").unwrap();
    let output = cmd.arg(fixture("papers/adams2022.json")).assert().success().get_output().stdout.clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["paper"]["citekey"], "adams2022survey");
    assert_eq!(value["citations"].as_array().unwrap().len(), 3);
    assert_eq!(value["citations"][2]["purpose"], "methodology_source");
    assert_eq!(value["citations"][2]["section"], "methods");
    assert_eq!(value["statistics"]["matched_citations"], 3);
}

#[test]
fn test_cli_batch_directory() {
    let mut cmd = Command::cargo_bin("citemap").unwrap();
    let output = cmd.arg(fixture("papers")).assert().success().get_output().stdout.clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["summary"]["total_papers"], 2);
    assert_eq!(value["cross_references"][0]["paper1"]["citekey"], "adams2022survey");
    assert_eq!(value["cross_references"][0]["paper2"]["citekey"], "jones2018deep");
    assert_eq!(value["cross_references"][0]["paper1_cites_paper2"], true);
}

#[test]
fn test_cli_batch_flag_and_output_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("report.json");

    let mut cmd = Command::cargo_bin("citemap").unwrap();
    cmd.arg(fixture("papers/adams2022.json"))
        .arg("--batch")
        .arg("-w")
        .arg("1")
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["summary"]["processed_papers"], 1);
}

#[test]
fn test_cli_context_width_and_config() {
    let mut cmd = Command::cargo_bin("citemap").unwrap();
    let output = cmd
        .arg(fixture("papers/adams2022.json"))
        .arg("-c")
        .arg(fixture("config.toml"))
        .arg("--context-width")
        .arg("10")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let window = value["citations"][0]["context_window"].as_str().unwrap();
    assert!(window.len() <= 10);
}

#[test]
fn test_cli_no_inputs() {
    let mut cmd = Command::cargo_bin("citemap").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No input files provided"));
}

#[test]
fn test_cli_invalid_json() {
    let dir = tempdir().unwrap();
    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{ not json").unwrap();

    let mut cmd = Command::cargo_bin("citemap").unwrap();
    cmd.arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON"));
}

#[test]
fn test_cli_empty_directory() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("citemap").unwrap();
    cmd.arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No papers found"));
}
