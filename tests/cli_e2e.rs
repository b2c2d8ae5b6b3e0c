//! End-to-end CLI tests for the trackdown binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Test that invoking with no source is a usage error with non-zero exit.
#[test]
fn test_binary_no_source_is_usage_error() {
    let mut cmd = Command::cargo_bin("trackdown").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

/// Test that supplying both a URL and --resume is rejected.
#[test]
fn test_binary_url_and_resume_conflict() {
    let mut cmd = Command::cargo_bin("trackdown").unwrap();
    cmd.arg("https://example.com/playlist")
        .arg("--resume")
        .arg("pl.info.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("trackdown").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tagged audio album"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("trackdown").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("trackdown"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    let mut cmd = Command::cargo_bin("trackdown").unwrap();
    cmd.arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Test that --resume with a missing descriptor file fails cleanly.
#[test]
fn test_binary_resume_missing_descriptor_fails() {
    let tmp = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("trackdown").unwrap();
    cmd.current_dir(tmp.path())
        .arg("--resume")
        .arg("absent.info.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("descriptor"));
}

/// Test that --resume with a corrupt descriptor file fails cleanly.
#[test]
fn test_binary_resume_corrupt_descriptor_fails() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("bad.info.json"), b"{ nope").unwrap();

    let mut cmd = Command::cargo_bin("trackdown").unwrap();
    cmd.current_dir(tmp.path())
        .arg("--resume")
        .arg("bad.info.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("descriptor"));
}

/// A resume run over an empty playlist completes fully offline: the
/// resolver is never needed, the playlist directory is created, the
/// descriptor is re-persisted, and the process exits 0.
#[test]
fn test_binary_resume_empty_playlist_completes_offline() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("pl0.info.json"),
        br#"{"id":"pl0","entries":[]}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("trackdown").unwrap();
    cmd.current_dir(tmp.path())
        .arg("--quiet")
        .arg("--resume")
        .arg("pl0.info.json")
        .assert()
        .success();

    assert!(tmp.path().join("pl0").is_dir(), "playlist dir not created");
    assert!(
        tmp.path().join("pl0.info.json").is_file(),
        "descriptor must survive the run"
    );
}

/// Re-running the same resume invocation succeeds: directory creation is
/// idempotent and the completed (empty) set stays complete.
#[test]
fn test_binary_resume_rerun_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("pl0.info.json"),
        br#"{"id":"pl0","entries":[]}"#,
    )
    .unwrap();

    for _ in 0..2 {
        let mut cmd = Command::cargo_bin("trackdown").unwrap();
        cmd.current_dir(tmp.path())
            .arg("--quiet")
            .arg("--resume")
            .arg("pl0.info.json")
            .assert()
            .success();
    }
}
