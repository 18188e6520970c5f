use crate::cli::commands::parse_optional_day;
use crate::cli::parser::{Commands, PeriodAction};
use crate::config::Config;
use crate::core::billing::BillingLogic;
use crate::core::projects::{PeriodSettings, ProjectLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::interval::Interval;
use crate::ui::messages::{header, success};
use crate::utils::colors::{CYAN, GREY, RESET, YELLOW};
use crate::utils::date::{format_date, today};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Period { action } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;

        match action {
            PeriodAction::Set {
                project,
                count,
                interval,
                start,
                inactive,
            } => {
                let settings = PeriodSettings {
                    count: *count,
                    interval: interval.as_deref().map(Interval::from_code).transpose()?,
                    default_interval: Interval::from_code(&cfg.default_interval)?,
                    start: parse_optional_day(start.as_ref())?,
                    active: !*inactive,
                };

                let period = ProjectLogic::set_repeat_period(&mut pool, *project, settings, today())?;
                success(format!(
                    "Project #{} billed {} from {}{}.",
                    period.project_id,
                    period.describe(),
                    format_date(&period.anchor_date),
                    if period.active { "" } else { " (inactive)" }
                ));
            }
            PeriodAction::Show { project } => {
                let (period, windows) = BillingLogic::project_windows(&pool, *project)?;

                header(format!("Repeat period of project #{}", project));
                println!("{CYAN}Cadence:{RESET} {}", period.describe());
                println!(
                    "{CYAN}Anchor:{RESET}  {} (window #{})",
                    format_date(&period.anchor_date),
                    period.anchor_index
                );
                println!(
                    "{CYAN}Status:{RESET}  {}",
                    if period.active {
                        "active".to_string()
                    } else {
                        format!("{YELLOW}inactive{RESET}")
                    }
                );
                println!("{CYAN}Windows:{RESET} {}", windows.len());

                let next = windows
                    .last()
                    .map(|w| w.sequence + 1)
                    .unwrap_or(period.anchor_index);
                match period.window_at(next) {
                    Some(w) => println!(
                        "{CYAN}Next:{RESET}    {} → {}",
                        format_date(&w.date),
                        format_date(&w.end_date)
                    ),
                    None => println!("{CYAN}Next:{RESET}    {GREY}--{RESET}"),
                }
            }
        }
    }
    Ok(())
}
