//! Integration tests for `dotenvlab doctor`

#![allow(deprecated)] // cargo_bin is deprecated in favour of a macro that cannot name this binary

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use std::process::Command;

use dotenvlab_testkit::temp_dir_in_workspace;
#[cfg(unix)]
use dotenvlab_testkit::{FakeCrab, fake_crab};

#[test]
fn test_doctor_exits_zero_when_not_installed() {
    let temp = temp_dir_in_workspace();

    Command::cargo_bin("dotenvlab")
        .unwrap()
        .env("DOTENVLAB_DIR", temp.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("not installed"));
}

#[test]
fn test_doctor_json_reports_missing_binary() {
    let temp = temp_dir_in_workspace();

    let output = Command::cargo_bin("dotenvlab")
        .unwrap()
        .env("DOTENVLAB_DIR", temp.path())
        .args(["doctor", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "doctor must always exit 0");

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["schema_version"], "1.0");

    let checks = report["checks"].as_array().unwrap();
    let binary_check = checks
        .iter()
        .find(|c| c["id"] == "binary_installed")
        .unwrap();
    assert_eq!(binary_check["status"], "error");
}

#[test]
#[cfg(unix)]
fn test_doctor_reports_healthy_installation() {
    let temp = temp_dir_in_workspace();
    let bin_dir = temp.path().join("bin");
    std::fs::create_dir_all(&bin_dir).unwrap();
    fake_crab(&bin_dir, &FakeCrab::ok("dotenvcrab 0.1.0"));

    let output = Command::cargo_bin("dotenvlab")
        .unwrap()
        .env("DOTENVLAB_DIR", temp.path())
        .args(["doctor", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let checks = report["checks"].as_array().unwrap();

    let binary_check = checks
        .iter()
        .find(|c| c["id"] == "binary_installed")
        .unwrap();
    assert_eq!(binary_check["status"], "ok");

    let health_check = checks
        .iter()
        .find(|c| c["id"] == "validator_responds")
        .unwrap();
    assert_eq!(health_check["status"], "ok");
}

#[test]
#[cfg(unix)]
fn test_doctor_flags_broken_validator() {
    let temp = temp_dir_in_workspace();
    let bin_dir = temp.path().join("bin");
    std::fs::create_dir_all(&bin_dir).unwrap();
    fake_crab(&bin_dir, &FakeCrab::failing(1, "segfault"));

    let output = Command::cargo_bin("dotenvlab")
        .unwrap()
        .env("DOTENVLAB_DIR", temp.path())
        .args(["doctor", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "doctor must always exit 0");

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let checks = report["checks"].as_array().unwrap();
    let health_check = checks
        .iter()
        .find(|c| c["id"] == "validator_responds")
        .unwrap();
    assert_eq!(health_check["status"], "error");
}

#[test]
#[cfg(unix)]
fn test_doctor_warns_without_recorded_state() {
    let temp = temp_dir_in_workspace();
    let bin_dir = temp.path().join("bin");
    std::fs::create_dir_all(&bin_dir).unwrap();
    fake_crab(&bin_dir, &FakeCrab::ok("dotenvcrab 0.1.0"));

    let output = Command::cargo_bin("dotenvlab")
        .unwrap()
        .env("DOTENVLAB_DIR", temp.path())
        .args(["doctor", "--json"])
        .output()
        .unwrap();

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let checks = report["checks"].as_array().unwrap();
    let state_check = checks
        .iter()
        .find(|c| c["id"] == "resolution_recorded")
        .unwrap();
    assert_eq!(state_check["status"], "warning");
}
