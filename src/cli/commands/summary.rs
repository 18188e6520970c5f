use crate::cli::commands::parse_optional_day;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary::SummaryLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::formatting::{bold, format_hours, rule};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { from, to } = cmd {
        let from = parse_optional_day(from.as_ref())?;
        let to = parse_optional_day(to.as_ref())?;

        let pool = DbPool::open(&cfg.database)?;
        let summary = SummaryLogic::summary(&pool, from, to)?;

        let scope = match (from, to) {
            (None, None) => "all time".to_string(),
            (Some(f), None) => format!("since {f}"),
            (None, Some(t)) => format!("until {t}"),
            (Some(f), Some(t)) => format!("{f} → {t}"),
        };
        header(format!("Hours summary ({scope})"));

        if summary.project_totals.is_empty() {
            info("No closed entries in range.");
        } else {
            let mut table = Table::new(vec![
                Column::new("Project", 8),
                Column::new("Business", 9),
                Column::new("Name", 30),
                Column::new("Hours", 9),
            ]);
            for t in &summary.project_totals {
                table.add_row(vec![
                    t.project_id.to_string(),
                    t.business_id.to_string(),
                    t.project_name.clone(),
                    format_hours(t.hours),
                ]);
            }
            print!("{}", table.render());
            println!("{}", rule(&cfg.separator_char, 60));
        }

        println!("{}", bold(&format!("Total: {} h", format_hours(summary.total_hours))));
    }
    Ok(())
}
