mod common;

use std::process::{Command, Output};

use common::write_gz;
use svm_stats_import::config::CONFIG_ENV;
use tempfile::tempdir;

fn run_bin(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_svm_stats_import"))
        .args(args)
        .env_remove(CONFIG_ENV)
        .output()
        .expect("spawn svm_stats_import")
}

#[test]
fn test_help_exits_zero() {
    let out = run_bin(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("--import-dir"));
    assert!(stdout.contains("--mongo-password"));
}

#[test]
fn test_configuration_error_exits_one() {
    let dir = tempdir().unwrap();
    let import_dir = dir.path().to_string_lossy().to_string();
    let out = run_bin(&["--import-dir", &import_dir, "--mongo-username", "svm"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Configuration error"));
}

#[test]
fn test_missing_config_file_exits_one() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.toml").to_string_lossy().to_string();
    let out = run_bin(&["--config", &missing]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_usage_error_exits_two() {
    let out = run_bin(&["--mongo-port", "not-a-port"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_dry_run_exits_zero_and_leaves_files() {
    let dir = tempdir().unwrap();
    let file = write_gz(dir.path(), "a.txt.gz", br#"[{"x":1},{"x":2}]"#);
    let import_dir = dir.path().to_string_lossy().to_string();
    let archive_dir = dir.path().join("ARCHIVE").to_string_lossy().to_string();
    let out = run_bin(&["--import-dir", &import_dir, "--archive-dir", &archive_dir, "--dry-run"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Importing 2 records"));
    assert!(file.exists());
    assert!(!dir.path().join("ARCHIVE").exists());
}
