#[cfg(test)]
extern crate assert_cmd;
extern crate predicates;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use std::process::Command;

#[test]
fn test_cli() {
    let mut cmd = Command::cargo_bin("permscan").expect("Calling binary failed");
    cmd.assert().failure();
}

#[test]
fn test_version() {
    let expected_version = "permscan 0.1.0\n";
    let mut cmd = Command::cargo_bin("permscan").expect("Calling binary failed");
    cmd.arg("--version").assert().stdout(expected_version);
}

#[test]
fn test_scan_exit_code() {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let mut cmd = Command::cargo_bin("permscan").expect("Calling binary failed");
    cmd.arg("scan").arg(temp_dir.path()).assert().code(0);
}

#[test]
fn test_scan_stdout() {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let mut cmd = Command::cargo_bin("permscan").expect("Calling binary failed");
    cmd.arg("scan")
        .arg(temp_dir.path())
        .assert()
        .stdout(predicate::str::contains("Scan completed successfully!"));
}

#[test]
fn test_probe_exit_code() {
    let mut cmd = Command::cargo_bin("permscan").expect("Calling binary failed");
    cmd.arg("probe")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("icacls:"));
}

#[test]
fn test_scan_exports_csv() {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let csv_path = temp_dir.path().join("out.csv");
    let mut cmd = Command::cargo_bin("permscan").expect("Calling binary failed");
    cmd.arg("scan")
        .arg(temp_dir.path())
        .arg("--csv")
        .arg(&csv_path)
        .assert()
        .code(0);
    assert!(csv_path.exists());
}
