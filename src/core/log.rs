use crate::db::log::{LogRow, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::truncate;
use ansi_term::Colour;
use regex::Regex;

const OP_WIDTH: usize = 60;

fn strip_ansi(re: &Regex, s: &str) -> String {
    re.replace_all(s, "").into_owned()
}

/// ANSI colour per audited operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "clock_in" | "add" => Colour::Green,
        "clock_out" | "del" => Colour::Red,
        "pause" | "resume" | "edit" => Colour::Yellow,
        "period" | "windows_refresh" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)` with only the operation coloured, cut to `OP_WIDTH`
/// visible characters.
fn render_operation(re: &Regex, row: &LogRow) -> String {
    let color = color_for_operation(&row.operation);
    let plain = if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    };

    let visible = truncate(&plain, OP_WIDTH);
    let colored = match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    };

    let padding = " ".repeat(OP_WIDTH.saturating_sub(strip_ansi(re, &colored).chars().count()));
    format!("{colored}{padding}")
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let rows = load_log(&pool.conn)?;
        if rows.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let re = Regex::new(r"\x1B\[[0-9;]*[mK]")
            .map_err(|e| crate::errors::AppError::Other(e.to_string()))?;

        let id_w = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| r.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");
        for row in &rows {
            let date = chrono::DateTime::parse_from_rfc3339(&row.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| row.date.clone());

            println!(
                "{:>id_w$}: {:<date_w$} | {} => {}",
                row.id,
                date,
                render_operation(&re, row),
                row.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
