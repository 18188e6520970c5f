use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::ClockLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::formatting::{format_hours, secs2readable};
use crate::utils::time::{format_ts, resolve_now};

/// Handles `in`, `out` and `pause`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let user = cfg.user.as_str();

    match cmd {
        Commands::In {
            project,
            activity,
            pause_open,
            at,
        } => {
            let now = resolve_now(at.as_ref())?;
            let mut pool = DbPool::open(&cfg.database)?;

            let result =
                ClockLogic::clock_in(&mut pool, user, *project, *activity, now, *pause_open)?;

            for e in &result.paused {
                info(format!("Entry #{} paused.", e.id));
            }
            success(format!(
                "Clocked in: entry #{} on project #{} at {}.",
                result.entry.id,
                project,
                format_ts(&now)
            ));
        }
        Commands::Out {
            entry,
            activity,
            comments,
            at,
        } => {
            let now = resolve_now(at.as_ref())?;
            let mut pool = DbPool::open(&cfg.database)?;

            let e = ClockLogic::clock_out(&mut pool, user, *entry, *activity, comments, now)?;

            let paused = if e.seconds_paused > 0 {
                format!(", paused {}", secs2readable(e.seconds_paused))
            } else {
                String::new()
            };
            success(format!(
                "Clocked out: entry #{} at {}, {} h{}.",
                e.id,
                format_ts(&now),
                format_hours(e.hours),
                paused
            ));
        }
        Commands::Pause { entry, at } => {
            let now = resolve_now(at.as_ref())?;
            let mut pool = DbPool::open(&cfg.database)?;

            let e = ClockLogic::toggle_paused(&mut pool, user, *entry, now)?;
            if e.is_paused() {
                success(format!("Entry #{} paused at {}.", e.id, format_ts(&now)));
            } else {
                success(format!(
                    "Entry #{} resumed at {} (paused {} so far).",
                    e.id,
                    format_ts(&now),
                    secs2readable(e.seconds_paused)
                ));
            }
        }
        _ => {}
    }

    Ok(())
}
