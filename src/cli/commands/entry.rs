use crate::cli::commands::ask_confirmation;
use crate::cli::parser::{Commands, EntryAction};
use crate::config::Config;
use crate::core::entries::{EntryChanges, EntryLogic, NewEntry};
use crate::db::entries::round2;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::entry::EntryView;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{RESET, color_for_state, colorize_optional};
use crate::utils::date::today;
use crate::utils::formatting::{bold, format_hours, rule, secs2readable};
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_ts, now, parse_optional_timestamp, parse_timestamp};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Entry { action } = cmd else {
        return Ok(());
    };
    let user = cfg.user.as_str();
    let mut pool = DbPool::open(&cfg.database)?;

    match action {
        EntryAction::Add {
            project,
            start,
            end,
            activity,
            comments,
        } => {
            let new = NewEntry {
                project_id: *project,
                activity_id: *activity,
                start: parse_timestamp(start)?,
                end: parse_timestamp(end)?,
                comments: comments.clone(),
            };
            let e = EntryLogic::add(&mut pool, user, new, now())?;
            success(format!(
                "Entry #{} added: {} h on project #{}.",
                e.id,
                format_hours(e.hours),
                e.project_id
            ));
        }
        EntryAction::Edit {
            id,
            start,
            end,
            project,
            activity,
            comments,
        } => {
            let changes = EntryChanges {
                project_id: *project,
                activity_id: *activity,
                start: parse_optional_timestamp(start.as_ref())?,
                end: parse_optional_timestamp(end.as_ref())?,
                comments: comments.clone(),
            };
            let e = EntryLogic::update(&mut pool, user, *id, changes, now())?;
            success(format!(
                "Entry #{} updated: {} → {}, {} h.",
                e.id,
                format_ts(&e.start_time),
                e.end_time.map(|t| format_ts(&t)).unwrap_or_default(),
                format_hours(e.hours)
            ));
        }
        EntryAction::Del { id, key } => {
            let key = match key {
                Some(k) => k.clone(),
                None => {
                    let k = EntryLogic::delete_key(&pool, user, *id)?;
                    if !ask_confirmation(&format!(
                        "Delete entry #{}? This action is irreversible.",
                        id
                    )) {
                        info("Operation cancelled.");
                        return Ok(());
                    }
                    k
                }
            };

            EntryLogic::delete(&mut pool, user, *id, &key)?;
            success(format!("Entry #{} has been deleted.", id));
        }
        EntryAction::List { days } => {
            let days = days.unwrap_or(cfg.history_days);
            let views = EntryLogic::recent(&pool, user, today(), days)?;

            if views.is_empty() {
                info(format!("No entries for {} in the last {} days.", user, days));
                return Ok(());
            }

            header(format!("Entries of {} (last {} days)", user, days));
            print_entries(&views, &cfg.separator_char);
        }
    }

    Ok(())
}

pub(crate) fn print_entries(views: &[EntryView], separator: &str) {
    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("Start", 19),
        Column::new("End", 19),
        Column::new("Paused", 7),
        Column::new("Hours", 7),
        Column::new("Project", 20),
        Column::new("Activity", 10),
        Column::new("State", 7),
        Column::new("Comments", 30),
    ]);

    let mut total = 0.0;
    for v in views {
        let e = &v.entry;
        total += e.hours;
        table.add_row(vec![
            e.id.to_string(),
            format_ts(&e.start_time),
            e.end_time
                .map(|t| format_ts(&t))
                .unwrap_or_else(|| "--".to_string()),
            secs2readable(e.seconds_paused),
            format_hours(e.hours),
            v.project_name.clone(),
            v.activity_code.clone().unwrap_or_default(),
            e.state_label().to_string(),
            e.comments.clone(),
        ]);
    }

    // Colour whole lines after layout so escape codes do not skew widths.
    let rendered = table.render();
    let mut lines = rendered.lines();
    if let Some(head) = lines.next() {
        println!("{}", bold(head));
    }
    for (line, v) in lines.zip(views) {
        let color = color_for_state(v.entry.is_open(), v.entry.is_paused());
        println!("{color}{line}{RESET}");
    }

    println!("{}", rule(separator, 60));
    println!(
        "Total: {} h",
        colorize_optional(&format_hours(round2(total)))
    );
}
