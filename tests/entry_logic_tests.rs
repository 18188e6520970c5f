use chrono::{NaiveDate, NaiveDateTime};
use timepiece::core::clock::ClockLogic;
use timepiece::core::entries::{EntryChanges, EntryLogic, NewEntry};
use timepiece::core::projects::ProjectLogic;
use timepiece::core::summary::SummaryLogic;
use timepiece::db::entries::load_entry;
use timepiece::db::initialize::init_db;
use timepiece::db::pool::DbPool;
use timepiece::errors::AppError;

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("valid timestamp")
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

/// Business #1, projects #1 and #2, activity #1.
fn setup() -> DbPool {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    init_db(&pool.conn).expect("migrations");

    let b = ProjectLogic::create_business(&mut pool, "Acme").expect("business");
    ProjectLogic::create_project(&mut pool, b.id, "Website", "").expect("project");
    ProjectLogic::create_project(&mut pool, b.id, "Mobile", "").expect("project");
    ProjectLogic::create_activity(&mut pool, "DEV", "Development").expect("activity");
    pool
}

fn add(pool: &mut DbPool, user: &str, project_id: i64, start: &str, end: &str) -> i64 {
    let new = NewEntry {
        project_id,
        activity_id: Some(1),
        start: ts(start),
        end: ts(end),
        comments: String::new(),
    };
    EntryLogic::add(pool, user, new, ts("2030-01-01 00:00"))
        .expect("add entry")
        .id
}

#[test]
fn test_clock_cycle_excludes_pauses() {
    let mut pool = setup();

    let opened = ClockLogic::clock_in(&mut pool, "ann", 1, None, ts("2025-05-05 08:00"), false)
        .expect("clock in");
    let id = opened.entry.id;
    assert!(opened.entry.is_open());
    assert_eq!(opened.entry.hours, 0.0);

    let paused = ClockLogic::toggle_paused(&mut pool, "ann", id, ts("2025-05-05 10:00"))
        .expect("pause");
    assert!(paused.is_paused());

    let resumed = ClockLogic::toggle_paused(&mut pool, "ann", id, ts("2025-05-05 10:30"))
        .expect("resume");
    assert!(!resumed.is_paused());
    assert_eq!(resumed.seconds_paused, 1800);

    let closed = ClockLogic::clock_out(&mut pool, "ann", id, 1, "done", ts("2025-05-05 12:15"))
        .expect("clock out");
    assert_eq!(closed.hours, 3.75);
    assert!(closed.pause_time.is_none());
    assert_eq!(closed.comments, "done");

    let stored = load_entry(&pool.conn, id).expect("load").expect("entry");
    assert_eq!(stored.hours, 3.75);
    assert_eq!(stored.activity_id, Some(1));
}

#[test]
fn test_clock_out_before_start_fails() {
    let mut pool = setup();
    let opened = ClockLogic::clock_in(&mut pool, "ann", 1, None, ts("2025-05-05 08:00"), false)
        .expect("clock in");

    let err = ClockLogic::clock_out(&mut pool, "ann", opened.entry.id, 1, "", ts("2025-05-05 07:00"))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTimeRange(_)));
}

#[test]
fn test_pause_open_only_touches_own_running_entries() {
    let mut pool = setup();

    let a1 = ClockLogic::clock_in(&mut pool, "ann", 1, None, ts("2025-05-05 08:00"), false)
        .expect("ann 1")
        .entry
        .id;
    let a2 = ClockLogic::clock_in(&mut pool, "ann", 2, None, ts("2025-05-05 08:30"), false)
        .expect("ann 2")
        .entry
        .id;
    ClockLogic::toggle_paused(&mut pool, "ann", a2, ts("2025-05-05 08:45")).expect("pause");
    let b1 = ClockLogic::clock_in(&mut pool, "bob", 1, None, ts("2025-05-05 08:00"), false)
        .expect("bob")
        .entry
        .id;

    let result = ClockLogic::clock_in(&mut pool, "ann", 2, None, ts("2025-05-05 09:00"), true)
        .expect("clock in with pause");

    let paused_ids: Vec<i64> = result.paused.iter().map(|e| e.id).collect();
    assert_eq!(paused_ids, vec![a1]);

    let a1 = load_entry(&pool.conn, a1).expect("load").expect("a1");
    assert_eq!(a1.pause_time, Some(ts("2025-05-05 09:00")));

    // Already paused entry keeps its original pause instant.
    let a2 = load_entry(&pool.conn, a2).expect("load").expect("a2");
    assert_eq!(a2.pause_time, Some(ts("2025-05-05 08:45")));

    let b1 = load_entry(&pool.conn, b1).expect("load").expect("b1");
    assert!(b1.pause_time.is_none());
}

#[test]
fn test_add_rejects_future_end() {
    let mut pool = setup();
    let new = NewEntry {
        project_id: 1,
        activity_id: None,
        start: ts("2025-05-05 08:00"),
        end: ts("2025-05-05 10:00"),
        comments: String::new(),
    };

    let err = EntryLogic::add(&mut pool, "ann", new, ts("2025-05-05 09:00")).unwrap_err();
    assert!(matches!(err, AppError::InvalidTimeRange(_)));
}

#[test]
fn test_update_clears_pause_longer_than_new_duration() {
    let mut pool = setup();

    let id = ClockLogic::clock_in(&mut pool, "ann", 1, None, ts("2025-05-05 08:00"), false)
        .expect("clock in")
        .entry
        .id;
    ClockLogic::toggle_paused(&mut pool, "ann", id, ts("2025-05-05 09:00")).expect("pause");
    ClockLogic::toggle_paused(&mut pool, "ann", id, ts("2025-05-05 11:00")).expect("resume");
    let closed = ClockLogic::clock_out(&mut pool, "ann", id, 1, "", ts("2025-05-05 12:00"))
        .expect("clock out");
    assert_eq!(closed.hours, 2.0);

    let changes = EntryChanges {
        start: Some(ts("2025-05-05 11:00")),
        ..EntryChanges::default()
    };
    let updated =
        EntryLogic::update(&mut pool, "ann", id, changes, ts("2030-01-01 00:00")).expect("update");
    assert_eq!(updated.seconds_paused, 0);
    assert_eq!(updated.hours, 1.0);
}

#[test]
fn test_delete_requires_matching_key() {
    let mut pool = setup();
    let id = add(&mut pool, "ann", 1, "2025-05-05 08:00", "2025-05-05 09:00");

    let err = EntryLogic::delete(&mut pool, "ann", id, "wrong").unwrap_err();
    assert!(matches!(err, AppError::DeleteKeyMismatch(_)));
    assert!(load_entry(&pool.conn, id).expect("load").is_some());

    let key = EntryLogic::delete_key(&pool, "ann", id).expect("key");
    assert!(!key.is_empty());

    // Another user cannot see the entry at all.
    assert!(matches!(
        EntryLogic::delete(&mut pool, "bob", id, &key),
        Err(AppError::InvalidEntry(_))
    ));

    EntryLogic::delete(&mut pool, "ann", id, &key).expect("delete");
    assert!(load_entry(&pool.conn, id).expect("load").is_none());
}

#[test]
fn test_recent_entries_newest_first() {
    let mut pool = setup();
    add(&mut pool, "ann", 1, "2025-05-01 08:00", "2025-05-01 09:00");
    add(&mut pool, "ann", 2, "2025-05-10 08:00", "2025-05-10 09:00");
    add(&mut pool, "ann", 1, "2025-04-01 08:00", "2025-04-01 09:00");
    add(&mut pool, "bob", 1, "2025-05-11 08:00", "2025-05-11 09:00");

    let views = EntryLogic::recent(&pool, "ann", day("2025-05-14"), 14).expect("recent");
    let starts: Vec<String> = views
        .iter()
        .map(|v| v.entry.start_time.format("%Y-%m-%d").to_string())
        .collect();
    assert_eq!(starts, vec!["2025-05-10", "2025-05-01"]);
    assert_eq!(views[0].project_name, "Mobile");
    assert_eq!(views[0].business_name, "Acme");
}

#[test]
fn test_summary_totals_match_project_totals() {
    let mut pool = setup();
    add(&mut pool, "ann", 1, "2025-05-01 08:00", "2025-05-01 10:30");
    add(&mut pool, "bob", 1, "2025-05-02 08:00", "2025-05-02 09:00");
    add(&mut pool, "ann", 2, "2025-05-03 08:00", "2025-05-03 08:45");
    ClockLogic::clock_in(&mut pool, "ann", 2, None, ts("2025-05-04 08:00"), false)
        .expect("open entry");

    let all = SummaryLogic::summary(&pool, None, None).expect("summary");
    let per_project: Vec<(i64, f64)> = all
        .project_totals
        .iter()
        .map(|t| (t.project_id, t.hours))
        .collect();
    assert_eq!(per_project, vec![(1, 3.5), (2, 0.75)]);
    assert_eq!(all.total_hours, 4.25);

    let sum: f64 = all.project_totals.iter().map(|t| t.hours).sum();
    assert_eq!(sum, all.total_hours);

    let bounded =
        SummaryLogic::summary(&pool, Some(day("2025-05-02")), Some(day("2025-05-03"))).expect("summary");
    assert_eq!(bounded.total_hours, 1.75);

    let empty = SummaryLogic::summary(&pool, Some(day("2026-01-01")), None).expect("summary");
    assert!(empty.project_totals.is_empty());
    assert_eq!(empty.total_hours, 0.0);
}
