#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const USER: &str = "tester";

pub fn tp() -> Command {
    cargo_bin_cmd!("timepiece")
}

/// `timepiece --db <db> --test --user tester`, never touching the real config.
pub fn tp_db(db_path: &str) -> Command {
    let mut cmd = tp();
    cmd.args(["--db", db_path, "--test", "--user", USER]);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timepiece.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB with business #1 "Acme", activity #1 "DEV" and
/// project #1 "Website".
pub fn init_db_with_project(db_path: &str) {
    tp_db(db_path).arg("init").assert().success();

    tp_db(db_path)
        .args(["business", "add", "Acme"])
        .assert()
        .success();

    tp_db(db_path)
        .args(["activity", "add", "DEV", "Development"])
        .assert()
        .success();

    tp_db(db_path)
        .args([
            "project",
            "add",
            "1",
            "Website",
            "--description",
            "Company site relaunch",
        ])
        .assert()
        .success();
}

/// Adds two closed entries on project #1 in March 2025: 7.00 h (with a one
/// hour pause) and 2.50 h.
pub fn add_march_entries(db_path: &str) {
    tp_db(db_path)
        .args(["in", "1", "--at", "2025-03-03 09:00"])
        .assert()
        .success();
    tp_db(db_path)
        .args(["pause", "1", "--at", "2025-03-03 12:00"])
        .assert()
        .success();
    tp_db(db_path)
        .args(["pause", "1", "--at", "2025-03-03 13:00"])
        .assert()
        .success();
    tp_db(db_path)
        .args(["out", "1", "--activity", "1", "--at", "2025-03-03 17:00"])
        .assert()
        .success();

    tp_db(db_path)
        .args([
            "entry",
            "add",
            "1",
            "--start",
            "2025-03-04 09:00",
            "--end",
            "2025-03-04 11:30",
            "--activity",
            "1",
            "--comments",
            "review",
        ])
        .assert()
        .success();
}
