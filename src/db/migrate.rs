//! Ordered schema migrations. Each applied migration leaves a
//! `migration_applied` row in `log`, so running the list again is a no-op.

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "0001_core_tables",
        description: "Created businesses, projects, activities and entries tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS businesses (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS projects (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            business_id  INTEGER NOT NULL REFERENCES businesses(id),
            name         TEXT NOT NULL,
            description  TEXT NOT NULL DEFAULT '',
            created_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS activities (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            code  TEXT NOT NULL UNIQUE,
            name  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS entries (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            username        TEXT NOT NULL,
            project_id      INTEGER NOT NULL REFERENCES projects(id),
            activity_id     INTEGER REFERENCES activities(id),
            start_time      TEXT NOT NULL,
            end_time        TEXT,
            pause_time      TEXT,
            seconds_paused  INTEGER NOT NULL DEFAULT 0,
            hours           REAL NOT NULL DEFAULT 0,
            comments        TEXT NOT NULL DEFAULT '',
            delete_key      TEXT NOT NULL,
            created_at      TEXT NOT NULL,
            CHECK (end_time IS NULL OR pause_time IS NULL)
        );
        "#,
    },
    Migration {
        version: "0002_billing_tables",
        description: "Created repeat_periods and billing_windows tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS repeat_periods (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id     INTEGER NOT NULL UNIQUE REFERENCES projects(id),
            count          INTEGER NOT NULL CHECK (count >= 1),
            interval_unit  TEXT NOT NULL CHECK (interval_unit IN ('day','week','month','year')),
            anchor_date    TEXT NOT NULL,
            anchor_index   INTEGER NOT NULL DEFAULT 0,
            active         INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS billing_windows (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            period_id   INTEGER NOT NULL REFERENCES repeat_periods(id) ON DELETE CASCADE,
            sequence    INTEGER NOT NULL,
            date        TEXT NOT NULL,
            end_date    TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            UNIQUE (period_id, sequence),
            CHECK (date < end_date)
        );
        "#,
    },
    Migration {
        version: "0003_lookup_indexes",
        description: "Added indexes for entry and window lookups",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_entries_user_start ON entries(username, start_time);
        CREATE INDEX IF NOT EXISTS idx_entries_project_start ON entries(project_id, start_time);
        CREATE INDEX IF NOT EXISTS idx_windows_period_date ON billing_windows(period_id, date);
        "#,
    },
];

/// Ensure that the `log` table exists: it also tracks applied migrations.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT NOT NULL DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> rusqlite::Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;
    tx.commit()
}

/// Public entry point: run all pending migrations, returning how many ran.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn).map_err(|e| AppError::Migration(format!("log table: {e}")))?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m).map_err(|e| AppError::Migration(format!("{}: {e}", m.version)))?;
        applied += 1;
    }

    Ok(applied)
}

/// Versions of the migrations already applied, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn known_migrations() -> usize {
    MIGRATIONS.len()
}
