use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{add_march_entries, init_db_with_project, setup_test_db, temp_out, tp_db};

/// Monthly period anchored on 2025-01-31 and refreshed on 2025-04-15:
/// windows #1 [01-31, 02-28), #2 [02-28, 03-31), #3 [03-31, 04-30).
fn monthly_windows(db_path: &str) {
    tp_db(db_path)
        .args([
            "period",
            "set",
            "1",
            "--count",
            "1",
            "--interval",
            "month",
            "--start",
            "2025-01-31",
        ])
        .assert()
        .success();

    tp_db(db_path)
        .args(["windows", "refresh", "--date", "2025-04-15"])
        .assert()
        .success()
        .stdout(contains("3 new billing window(s)"));
}

#[test]
fn test_windows_refresh_is_idempotent() {
    let db_path = setup_test_db("windows_refresh_idempotent");
    init_db_with_project(&db_path);
    monthly_windows(&db_path);

    tp_db(&db_path)
        .args(["windows", "refresh", "--date", "2025-04-15"])
        .assert()
        .success()
        .stdout(contains("up to date as of 2025-04-15"));

    tp_db(&db_path)
        .args(["windows", "refresh", "--date", "2025-05-01"])
        .assert()
        .success()
        .stdout(
            contains("1 new billing window(s)")
                .and(contains("2025-04-30"))
                .and(contains("timepiece sheet 1 --window 4")),
        );
}

#[test]
fn test_windows_list_clamps_month_end_without_drift() {
    let db_path = setup_test_db("windows_list_month_end");
    init_db_with_project(&db_path);
    monthly_windows(&db_path);

    tp_db(&db_path)
        .args(["windows", "list", "1"])
        .assert()
        .success()
        .stdout(
            contains("2025-01-31")
                .and(contains("2025-02-27"))
                .and(contains("2025-02-28"))
                .and(contains("2025-03-30"))
                .and(contains("2025-03-31"))
                .and(contains("2025-04-29")),
        );
}

#[test]
fn test_inactive_period_is_skipped_by_refresh() {
    let db_path = setup_test_db("windows_inactive");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args([
            "period",
            "set",
            "1",
            "--interval",
            "week",
            "--start",
            "2025-01-06",
            "--inactive",
        ])
        .assert()
        .success()
        .stdout(contains("(inactive)"));

    tp_db(&db_path)
        .args(["windows", "refresh", "--date", "2025-03-01"])
        .assert()
        .success()
        .stdout(contains("up to date"));
}

#[test]
fn test_time_sheet_for_window() {
    let db_path = setup_test_db("sheet_window");
    init_db_with_project(&db_path);
    add_march_entries(&db_path);
    monthly_windows(&db_path);

    tp_db(&db_path)
        .args(["sheet", "1", "--window", "2"])
        .assert()
        .success()
        .stdout(
            contains("Time sheet: Website (Acme)")
                .and(contains("2025-02-28 → 2025-03-30"))
                .and(contains("review"))
                .and(contains("Billable hours: 9.50")),
        );

    // Latest window (April) has no entries.
    tp_db(&db_path)
        .args(["sheet", "1"])
        .assert()
        .success()
        .stdout(contains("No entries in this billing window.").and(contains("Billable hours: 0.00")));
}

#[test]
fn test_time_sheet_without_windows_fails() {
    let db_path = setup_test_db("sheet_no_window");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args(["sheet", "1"])
        .assert()
        .failure()
        .stderr(contains("No billing window found for project 1"));
}

#[test]
fn test_period_cadence_change_continues_from_last_window() {
    let db_path = setup_test_db("period_cadence_change");
    init_db_with_project(&db_path);
    monthly_windows(&db_path);

    tp_db(&db_path)
        .args(["period", "set", "1", "--count", "2", "--interval", "week"])
        .assert()
        .success()
        .stdout(contains("every 2 weeks from 2025-04-30"));

    tp_db(&db_path)
        .args(["windows", "refresh", "--date", "2025-05-20"])
        .assert()
        .success()
        .stdout(contains("2 new billing window(s)").and(contains("2025-05-14")));

    // Moving the start of a period that already has windows is refused.
    tp_db(&db_path)
        .args([
            "period",
            "set",
            "1",
            "--count",
            "2",
            "--interval",
            "week",
            "--start",
            "2025-06-01",
        ])
        .assert()
        .failure()
        .stderr(contains("already has billing windows"));
}

#[test]
fn test_summary_per_project_and_total() {
    let db_path = setup_test_db("summary_totals");
    init_db_with_project(&db_path);
    add_march_entries(&db_path);

    tp_db(&db_path)
        .args(["project", "add", "1", "Mobile app"])
        .assert()
        .success();
    tp_db(&db_path)
        .args([
            "entry",
            "add",
            "2",
            "--start",
            "2025-04-01 10:00",
            "--end",
            "2025-04-01 11:00",
        ])
        .assert()
        .success();

    tp_db(&db_path)
        .args(["summary"])
        .assert()
        .success()
        .stdout(
            contains("Website")
                .and(contains("9.50"))
                .and(contains("Mobile app"))
                .and(contains("Total: 10.50 h")),
        );

    tp_db(&db_path)
        .args(["summary", "--from", "2025-03-01", "--to", "2025-03-31"])
        .assert()
        .success()
        .stdout(contains("Total: 9.50 h").and(contains("Mobile app").not()));

    tp_db(&db_path)
        .args(["summary", "--from", "2025-03-04", "--to", "2025-03-04"])
        .assert()
        .success()
        .stdout(contains("Total: 2.50 h"));
}

#[test]
fn test_summary_rejects_bad_dates() {
    let db_path = setup_test_db("summary_bad_dates");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args(["summary", "--from", "03/01/2025"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    tp_db(&db_path)
        .args(["summary", "--from", "2025-03-02", "--to", "2025-03-01"])
        .assert()
        .failure()
        .stderr(contains("Invalid time range"));
}

#[test]
fn test_export_window_csv() {
    let db_path = setup_test_db("export_window_csv");
    init_db_with_project(&db_path);
    add_march_entries(&db_path);
    monthly_windows(&db_path);

    let out = temp_out("export_window_csv", "csv");

    tp_db(&db_path)
        .args([
            "export", "--format", "csv", "--file", &out, "--project", "1", "--window", "2",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("id,user,business,project_id,project"));
    assert!(content.contains("Website"));
    assert!(content.contains("2025-03-04 09:00:00"));
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_export_range_json() {
    let db_path = setup_test_db("export_range_json");
    init_db_with_project(&db_path);
    add_march_entries(&db_path);

    let out = temp_out("export_range_json", "json");

    tp_db(&db_path)
        .args([
            "export", "--format", "json", "--file", &out, "--range", "2025-03-04",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["comments"], "review");
    assert_eq!(rows[0]["hours"], 2.5);
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_project(&db_path);
    add_march_entries(&db_path);

    tp_db(&db_path)
        .args(["export", "--format", "csv", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_backup_compressed() {
    let db_path = setup_test_db("backup_compressed");
    init_db_with_project(&db_path);

    let out = temp_out("backup_compressed", "sqlite");
    let zip = out.replace(".sqlite", ".zip");
    fs::remove_file(&zip).ok();

    tp_db(&db_path)
        .args(["backup", "--file", &out, "--compress"])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    assert!(fs::metadata(&zip).is_ok());
}

#[test]
fn test_backup_compressed_asks_before_replacing_plain_copy() {
    let db_path = setup_test_db("backup_keep_plain");
    init_db_with_project(&db_path);

    let out = temp_out("backup_keep_plain", "sqlite");
    let zip = out.replace(".sqlite", ".zip");
    fs::remove_file(&zip).ok();
    fs::write(&out, "keep").expect("write existing file");

    tp_db(&db_path)
        .args(["backup", "--file", &out, "--compress"])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("cancelled"));

    assert_eq!(fs::read_to_string(&out).expect("read"), "keep");
    assert!(fs::metadata(&zip).is_err());
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_records");
    init_db_with_project(&db_path);
    monthly_windows(&db_path);

    tp_db(&db_path)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("migration_applied")
                .and(contains("windows_refresh"))
                .and(contains("3 new billing window(s)")),
        );
}
