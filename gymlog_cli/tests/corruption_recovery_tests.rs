//! Corruption recovery tests for the gymlog binary.
//!
//! Malformed stored history is never fatal: it reads back as an empty list
//! and the next save starts a fresh history.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("gymlog"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_history_with_invalid_json() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::create_dir_all(data_dir).unwrap();
    fs::write(data_dir.join("workout_history_v1.json"), "not json").unwrap();

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved workouts yet."));
}

#[test]
fn test_history_with_non_array_json() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(
        data_dir.join("workout_history_v1.json"),
        r#"{"id":"x","rows":[]}"#,
    )
    .unwrap();

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved workouts yet."));
}

#[test]
fn test_save_over_corrupted_history_starts_fresh() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(data_dir.join("workout_history_v1.json"), "{ invalid }}}}").unwrap();

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--part")
        .arg("Legs")
        .write_stdin("/add Squat | 225 | 5\n/end\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("added to history"));

    // The rewritten file is valid JSON with exactly the new session
    let raw = fs::read_to_string(data_dir.join("workout_history_v1.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("history should be valid");
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}

#[test]
fn test_show_on_corrupted_history() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(data_dir.join("workout_history_v1.json"), "[[[[").unwrap();

    cli()
        .arg("show")
        .arg("whatever")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout not found."));
}

#[test]
fn test_missing_data_dir_is_created_on_save() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("nested").join("gymlog");

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--part")
        .arg("Pull")
        .write_stdin("/add Deadlift | 315 | 3\n/end\n/quit\n")
        .assert()
        .success();

    assert!(data_dir.join("workout_history_v1.json").exists());
}
