use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_project, setup_test_db, tp_db};

#[test]
fn test_project_list_and_show() {
    let db_path = setup_test_db("project_list_show");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args(["project", "add", "1", "Mobile app"])
        .assert()
        .success()
        .stdout(contains("Project #2 'Mobile app' created for Acme."));

    tp_db(&db_path)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(contains("Website").and(contains("Mobile app")));

    tp_db(&db_path)
        .args(["project", "show", "1"])
        .assert()
        .success()
        .stdout(
            contains("Project #1 Website")
                .and(contains("Company site relaunch"))
                .and(contains("no repeat period")),
        );
}

#[test]
fn test_project_search_single_match_shows_project() {
    let db_path = setup_test_db("project_search_single");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args(["project", "add", "1", "Mobile app"])
        .assert()
        .success();

    // Matches the description of "Website" only, case-insensitively.
    tp_db(&db_path)
        .args(["project", "list", "--search", "RELAUNCH"])
        .assert()
        .success()
        .stdout(contains("Project #1 Website").and(contains("Mobile app").not()));
}

#[test]
fn test_project_search_without_match() {
    let db_path = setup_test_db("project_search_none");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args(["project", "list", "--search", "nothing-like-this"])
        .assert()
        .success()
        .stdout(contains("No projects found."));
}

#[test]
fn test_project_edit_moves_business() {
    let db_path = setup_test_db("project_edit");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args(["business", "add", "Globex"])
        .assert()
        .success();

    tp_db(&db_path)
        .args(["project", "edit", "1", "--business", "2", "--name", "Portal"])
        .assert()
        .success()
        .stdout(contains("Project #1 Portal").and(contains("Globex")));

    tp_db(&db_path)
        .args(["project", "edit", "1", "--business", "9"])
        .assert()
        .failure()
        .stderr(contains("No such business: 9"));
}

#[test]
fn test_period_set_and_show() {
    let db_path = setup_test_db("period_set_show");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args([
            "period", "set", "1", "--count", "2", "--interval", "week", "--start", "2025-01-06",
        ])
        .assert()
        .success()
        .stdout(contains("billed every 2 weeks from 2025-01-06"));

    tp_db(&db_path)
        .args(["period", "show", "1"])
        .assert()
        .success()
        .stdout(
            contains("every 2 weeks")
                .and(contains("active"))
                .and(contains("2025-01-06 → 2025-01-20")),
        );

    tp_db(&db_path)
        .args(["project", "show", "1"])
        .assert()
        .success()
        .stdout(contains("every 2 weeks from 2025-01-06"));
}

#[test]
fn test_period_toggle_keeps_cadence() {
    let db_path = setup_test_db("period_toggle");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args([
            "period", "set", "1", "--count", "2", "--interval", "week", "--start", "2025-01-06",
        ])
        .assert()
        .success();

    tp_db(&db_path)
        .args(["period", "set", "1", "--inactive"])
        .assert()
        .success()
        .stdout(contains("billed every 2 weeks from 2025-01-06 (inactive)"));

    tp_db(&db_path)
        .args(["period", "show", "1"])
        .assert()
        .success()
        .stdout(
            contains("every 2 weeks")
                .and(contains("inactive"))
                .and(contains("2025-01-06 → 2025-01-20")),
        );

    tp_db(&db_path)
        .args(["period", "set", "1"])
        .assert()
        .success()
        .stdout(contains("billed every 2 weeks from 2025-01-06."));
}

#[test]
fn test_period_set_rejects_bad_input() {
    let db_path = setup_test_db("period_bad_input");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args(["period", "set", "1", "--count", "0", "--interval", "month"])
        .assert()
        .failure()
        .stderr(contains("Invalid repeat count: 0"));

    tp_db(&db_path)
        .args(["period", "set", "1", "--interval", "fortnight"])
        .assert()
        .failure()
        .stderr(contains("Invalid repeat interval: fortnight"));

    tp_db(&db_path)
        .args(["period", "show", "1"])
        .assert()
        .failure()
        .stderr(contains("Project 1 has no repeat period"));
}

#[test]
fn test_business_and_activity_lists() {
    let db_path = setup_test_db("business_activity_lists");
    init_db_with_project(&db_path);

    tp_db(&db_path)
        .args(["business", "list"])
        .assert()
        .success()
        .stdout(contains("Acme"));

    tp_db(&db_path)
        .args(["activity", "list"])
        .assert()
        .success()
        .stdout(contains("DEV").and(contains("Development")));

    // Activity codes are unique.
    tp_db(&db_path)
        .args(["activity", "add", "DEV", "Again"])
        .assert()
        .failure();
}
