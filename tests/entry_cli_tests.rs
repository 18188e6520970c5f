use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add_march_entries, init_db_with_project, setup_test_db, tp, tp_db};

#[test]
fn test_clock_in_pause_out_excludes_paused_time() {
    let db_path = setup_test_db("clock_pause_out");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args(["in", "1", "--at", "2025-03-03 09:00"])
        .assert()
        .success()
        .stdout(contains("Clocked in: entry #1"));

    tp_db(&db_path)
        .args(["pause", "1", "--at", "2025-03-03 12:00"])
        .assert()
        .success()
        .stdout(contains("Entry #1 paused"));

    tp_db(&db_path)
        .args(["pause", "1", "--at", "2025-03-03 13:00"])
        .assert()
        .success()
        .stdout(contains("resumed").and(contains("1:00")));

    tp_db(&db_path)
        .args(["out", "1", "--activity", "1", "--at", "2025-03-03 17:00"])
        .assert()
        .success()
        .stdout(contains("7.00 h").and(contains("paused 1:00")));
}

#[test]
fn test_clock_out_of_paused_entry_counts_pause() {
    let db_path = setup_test_db("clock_out_paused");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args(["in", "1", "--at", "2025-03-03 09:00"])
        .assert()
        .success();
    tp_db(&db_path)
        .args(["pause", "1", "--at", "2025-03-03 16:00"])
        .assert()
        .success();

    tp_db(&db_path)
        .args(["out", "1", "--activity", "1", "--at", "2025-03-03 17:00"])
        .assert()
        .success()
        .stdout(contains("7.00 h"));
}

#[test]
fn test_clock_out_twice_fails() {
    let db_path = setup_test_db("clock_out_twice");
    init_db_with_project(&db_path);
    add_march_entries(&db_path);

    tp_db(&db_path)
        .args(["out", "1", "--activity", "1", "--at", "2025-03-03 18:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid log entry: 1"));
}

#[test]
fn test_clock_out_requires_existing_activity() {
    let db_path = setup_test_db("clock_out_activity");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args(["in", "1", "--at", "2025-03-03 09:00"])
        .assert()
        .success();

    tp_db(&db_path)
        .args(["out", "1", "--activity", "99", "--at", "2025-03-03 10:00"])
        .assert()
        .failure()
        .stderr(contains("No such activity: 99"));
}

#[test]
fn test_other_user_cannot_clock_out_entry() {
    let db_path = setup_test_db("clock_out_other_user");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args(["in", "1", "--at", "2025-03-03 09:00"])
        .assert()
        .success();

    tp()
        .args([
            "--db",
            &db_path,
            "--test",
            "--user",
            "someone",
            "out",
            "1",
            "--activity",
            "1",
            "--at",
            "2025-03-03 10:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid log entry: 1"));
}

#[test]
fn test_clock_in_pause_open_pauses_running_entries() {
    let db_path = setup_test_db("clock_in_pause_open");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args(["in", "1", "--at", "2025-03-03 09:00"])
        .assert()
        .success();

    tp_db(&db_path)
        .args(["in", "1", "--pause-open", "--at", "2025-03-03 10:00"])
        .assert()
        .success()
        .stdout(contains("Entry #1 paused").and(contains("Clocked in: entry #2")));
}

#[test]
fn test_unknown_project_is_rejected() {
    let db_path = setup_test_db("clock_in_unknown_project");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args(["in", "42"])
        .assert()
        .failure()
        .stderr(contains("No such project: 42"));
}

#[test]
fn test_add_and_edit_entry_recomputes_hours() {
    let db_path = setup_test_db("entry_add_edit");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args([
            "entry",
            "add",
            "1",
            "--start",
            "2025-03-04 09:00",
            "--end",
            "2025-03-04 11:30",
        ])
        .assert()
        .success()
        .stdout(contains("Entry #1 added: 2.50 h"));

    tp_db(&db_path)
        .args(["entry", "edit", "1", "--end", "2025-03-04 12:00"])
        .assert()
        .success()
        .stdout(contains("3.00 h"));
}

#[test]
fn test_add_entry_rejects_reversed_range() {
    let db_path = setup_test_db("entry_add_reversed");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args([
            "entry",
            "add",
            "1",
            "--start",
            "2025-03-04 12:00",
            "--end",
            "2025-03-04 11:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid time range"));
}

#[test]
fn test_edit_open_entry_fails() {
    let db_path = setup_test_db("entry_edit_open");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args(["in", "1", "--at", "2025-03-03 09:00"])
        .assert()
        .success();

    tp_db(&db_path)
        .args(["entry", "edit", "1", "--comments", "too early"])
        .assert()
        .failure()
        .stderr(contains("still open"));
}

#[test]
fn test_delete_entry_with_wrong_key_fails() {
    let db_path = setup_test_db("entry_del_wrong_key");
    init_db_with_project(&db_path);
    add_march_entries(&db_path);

    tp_db(&db_path)
        .args(["entry", "del", "1", "--key", "not-the-key"])
        .assert()
        .failure()
        .stderr(contains("Delete key does not match entry 1"));
}

#[test]
fn test_delete_entry_after_confirmation() {
    let db_path = setup_test_db("entry_del_confirm");
    init_db_with_project(&db_path);
    add_march_entries(&db_path);

    tp_db(&db_path)
        .args(["entry", "del", "2"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Entry #2 has been deleted."));

    tp_db(&db_path)
        .args(["summary"])
        .assert()
        .success()
        .stdout(contains("Total: 7.00 h"));
}

#[test]
fn test_delete_entry_cancelled() {
    let db_path = setup_test_db("entry_del_cancel");
    init_db_with_project(&db_path);
    add_march_entries(&db_path);

    tp_db(&db_path)
        .args(["entry", "del", "2"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled."));

    tp_db(&db_path)
        .args(["summary"])
        .assert()
        .success()
        .stdout(contains("Total: 9.50 h"));
}

#[test]
fn test_entry_list_shows_recent_open_entry() {
    let db_path = setup_test_db("entry_list_recent");
    init_db_with_project(&db_path);
    add_march_entries(&db_path);

    tp_db(&db_path).args(["in", "1"]).assert().success();

    tp_db(&db_path)
        .args(["entry", "list"])
        .assert()
        .success()
        .stdout(
            contains("Website")
                .and(contains("open"))
                .and(contains("2025-03-03").not()),
        );
}
