use crate::cli::commands::parse_optional_day;
use crate::cli::parser::{Commands, WindowsAction};
use crate::config::Config;
use crate::core::billing::BillingLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::billing_window::BillingWindow;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{GREY, RESET};
use crate::utils::date::{format_date, today};
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Windows { action } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;

        match action {
            WindowsAction::Refresh { date } => {
                let day = parse_optional_day(date.as_ref())?.unwrap_or_else(today);
                let created = BillingLogic::refresh(&mut pool, day)?;

                if created.is_empty() {
                    info(format!("Billing windows are up to date as of {}.", format_date(&day)));
                    return Ok(());
                }

                success(format!("{} new billing window(s):", created.len()));
                print!("{}", window_table(&created, None).render());
                for w in &created {
                    println!(
                        "{GREY}  time sheet: timepiece sheet {} --window {}{RESET}",
                        w.project_id, w.id
                    );
                }
            }
            WindowsAction::List { project } => {
                let (period, windows) = BillingLogic::project_windows(&pool, *project)?;

                header(format!(
                    "Billing windows of project #{} ({})",
                    project,
                    period.describe()
                ));
                if windows.is_empty() {
                    info("No billing windows yet; run `timepiece windows refresh`.");
                } else {
                    print!("{}", window_table(&windows, Some(today())).render());
                }
            }
        }
    }
    Ok(())
}

/// Windows as a table; the one containing `current` is marked.
fn window_table(windows: &[BillingWindow], current: Option<NaiveDate>) -> Table {
    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("Project", 8),
        Column::new("Seq", 5),
        Column::new("From", 10),
        Column::new("To", 10),
        Column::new("Days", 5),
        Column::new("", 8),
    ]);

    for w in windows {
        let mark = match current {
            Some(d) if w.contains(d) => "current",
            _ => "",
        };
        table.add_row(vec![
            w.id.to_string(),
            w.project_id.to_string(),
            w.sequence.to_string(),
            format_date(&w.date),
            format_date(&w.last_day()),
            w.days().to_string(),
            mark.to_string(),
        ]);
    }

    table
}

