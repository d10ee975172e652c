//! Failure tests for the babylog binary.
//!
//! These tests verify the run aborts with a useful message on:
//! - Missing input files
//! - Unparseable timestamps
//! - Unknown event kinds
//! - Malformed CSV and invalid configuration

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("babylog"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn write_config(dir: &Path, extra: &str) -> PathBuf {
    let config_path = dir.join("config.toml");
    fs::write(
        &config_path,
        format!("[data]\ndata_dir = {:?}\n{}", dir.display().to_string(), extra),
    )
    .expect("Failed to write config");
    config_path
}

#[test]
fn test_missing_input_file() {
    let temp_dir = setup_test_dir();
    let config_path = write_config(temp_dir.path(), "");

    cli()
        .arg("process")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));

    assert!(!temp_dir.path().join("timeline.csv").exists());
}

#[test]
fn test_bad_timestamp_aborts_with_record() {
    let temp_dir = setup_test_dir();
    let config_path = write_config(temp_dir.path(), "");
    fs::write(
        temp_dir.path().join("events.csv"),
        "Type,Start,End\nFeed,2022-11-10 09:00,2022-11-10 09:30\nFeed,last tuesday,\n",
    )
    .unwrap();

    cli()
        .arg("process")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record 2"))
        .stderr(predicate::str::contains("last tuesday"));

    assert!(!temp_dir.path().join("timeline.csv").exists());
}

#[test]
fn test_unknown_kind_aborts() {
    let temp_dir = setup_test_dir();
    let config_path = write_config(temp_dir.path(), "");
    fs::write(
        temp_dir.path().join("events.csv"),
        "Type,Start,End\nStroller Walk,2022-11-10 09:00,2022-11-10 09:30\n",
    )
    .unwrap();

    cli()
        .arg("process")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown event kind 'stroller walk'"));
}

#[test]
fn test_excluding_an_unknown_label_is_allowed() {
    let temp_dir = setup_test_dir();
    let config_path = write_config(
        temp_dir.path(),
        "[normalize]\nexcluded_kinds = [\"pump\", \"stroller walk\"]\n",
    );
    fs::write(
        temp_dir.path().join("events.csv"),
        "Type,Start,End\nStroller Walk,2022-11-10 09:00,2022-11-10 09:30\nFeed,2022-11-10 10:00,2022-11-10 10:20\n",
    )
    .unwrap();

    cli()
        .arg("process")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();
}

#[test]
fn test_ragged_csv_aborts() {
    let temp_dir = setup_test_dir();
    let config_path = write_config(temp_dir.path(), "");
    fs::write(
        temp_dir.path().join("events.csv"),
        "Type,Start,End\nFeed,2022-11-10 09:00\n",
    )
    .unwrap();

    cli()
        .arg("process")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("CSV error"));
}

#[test]
fn test_invalid_config_rejected() {
    let temp_dir = setup_test_dir();
    let config_path = write_config(temp_dir.path(), "[extrapolation]\nthreshold_minutes = 90\n");

    cli()
        .arg("process")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold_minutes"));
}

#[test]
fn test_corrupted_config_rejected() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[data\nthis is not toml").unwrap();

    cli()
        .arg("process")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("TOML error"));
}
