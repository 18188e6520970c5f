use crate::db::migrate::{applied_versions, known_migrations};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, table: &str) -> AppResult<i64> {
    let n = pool
        .conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
    Ok(n)
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    let versions = applied_versions(&pool.conn)?;
    println!(
        "{}• Migrations:{} {}/{} applied",
        CYAN,
        RESET,
        versions.len(),
        known_migrations()
    );

    for table in ["businesses", "projects", "activities", "entries", "repeat_periods", "billing_windows"] {
        println!(
            "{}• {}:{} {}{}{}",
            CYAN,
            table,
            RESET,
            GREEN,
            count(pool, table)?,
            RESET
        );
    }

    let open: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE end_time IS NULL",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Open entries:{} {}", CYAN, RESET, open);

    let first: Option<String> = pool
        .conn
        .query_row("SELECT MIN(start_time) FROM entries", [], |row| row.get(0))
        .optional()?
        .flatten();
    let last: Option<String> = pool
        .conn
        .query_row("SELECT MAX(start_time) FROM entries", [], |row| row.get(0))
        .optional()?
        .flatten();

    let placeholder = format!("{GREY}--{RESET}");
    println!("{}• Entry range:{}", CYAN, RESET);
    println!("    from: {}", first.unwrap_or_else(|| placeholder.clone()));
    println!("    to:   {}", last.unwrap_or(placeholder));

    println!();
    Ok(())
}
