//! Failure-path tests for the fitdash binary.
//!
//! These tests verify the system can handle:
//! - Unparsable rows in stored tables
//! - A data directory that cannot hold the workbook
//! - A store that rejects a submission

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fitdash"));
    cmd.env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env_remove("RUST_LOG");
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_unparsable_rows_are_skipped() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();

    fs::write(
        data_dir.join("exercise_log.csv"),
        "Date,Exercise,Sets,Rep,Muscle,Weight\n\
         2024-01-01,Pull-ups,3,8,Back,N/A\n\
         yesterday,Pull-ups,3,8,Back,N/A\n\
         2024-01-02,Pull-ups,three,8,Back,N/A\n",
    )
    .unwrap();
    fs::write(
        data_dir.join("body_metrics.csv"),
        "Date,Calories,Weight\n2024-01-01,2000,not-a-number\n2024-01-02,2000,82\n",
    )
    .unwrap();

    cli(&temp_dir)
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("metrics")
        .assert()
        .success()
        .stdout(predicate::str::contains("Top Muscle Group Targeted: Back"))
        .stdout(predicate::str::contains("Current Weight: 82.0 kg/lbs"));
}

#[test]
fn test_missing_muscle_column_is_reported() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();

    fs::write(
        data_dir.join("exercise_log.csv"),
        "Date,Exercise,Sets,Rep\n2024-01-01,Plank,3,30\n",
    )
    .unwrap();

    cli(&temp_dir)
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("metrics")
        .assert()
        .success()
        .stdout(predicate::str::contains("Column 'Muscle' not found in data."));
}

#[test]
fn test_data_dir_that_is_a_file_fails_cleanly() {
    let temp_dir = setup_test_dir();
    let data_path = temp_dir.path().join("data");
    fs::write(&data_path, "not a directory").unwrap();

    cli(&temp_dir)
        .arg("--data-dir")
        .arg(&data_path)
        .args(["weight", "--calories", "2000", "--body-weight", "80"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn test_failed_submit_keeps_entries_for_retry() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();

    // A directory where the table file should be makes every append fail
    fs::create_dir_all(data_dir.join("exercise_log.csv")).unwrap();

    cli(&temp_dir)
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("exercise")
        .write_stdin("a\n1\n\n\n\ns\nl\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✗ Failed to save exercises"))
        .stdout(predicate::str::contains("Your 1 entries are kept"))
        .stdout(predicate::str::contains("1. Barbell Squats - 4 sets of 8 (Quads)"))
        .stdout(predicate::str::contains("Discarding 1 unsaved exercises"));
}
