use crate::cli::commands::entry::print_entries;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timesheet::project_time_sheet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, RESET};
use crate::utils::date::format_date;
use crate::utils::formatting::format_hours;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sheet { project, window } = cmd {
        let pool = DbPool::open(&cfg.database)?;
        let sheet = project_time_sheet(&pool, *project, *window)?;

        header(format!(
            "Time sheet: {} ({})",
            sheet.project.name, sheet.project.business_name
        ));
        println!(
            "{CYAN}Window:{RESET} #{} {} → {} ({} days, billed {})",
            sheet.window.id,
            format_date(&sheet.window.date),
            format_date(&sheet.window.last_day()),
            sheet.window.days(),
            sheet.period.describe()
        );

        if sheet.entries.is_empty() {
            info("No entries in this billing window.");
        } else {
            print_entries(&sheet.entries, &cfg.separator_char);
        }
        println!("Billable hours: {}", format_hours(sheet.total_hours));
    }
    Ok(())
}
