// src/export/logic.rs

use crate::db::billing::load_project_window;
use crate::db::entries::{load_entries_between, load_project_entries};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::range::parse_range;
use crate::export::{EntryExport, ExportFormat, ensure_writable};
use crate::ui::messages::warning;
use std::path::Path;

/// Which entries to export.
#[derive(Debug, Clone)]
pub enum ExportScope {
    /// `None` or `"all"` exports everything; otherwise a range expression.
    Range(Option<String>),
    /// Entries of a project inside one of its billing windows
    /// (the latest one when no window id is given).
    Window {
        project_id: i64,
        window_id: Option<i64>,
    },
}

pub struct ExportLogic;

impl ExportLogic {
    /// Write the selected entries to `file` (absolute path). Returns the
    /// number of exported rows; nothing is written when there are none.
    pub fn export(
        pool: &DbPool,
        format: ExportFormat,
        file: &str,
        scope: &ExportScope,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let views = match scope {
            ExportScope::Range(None) => load_entries_between(&pool.conn, None)?,
            ExportScope::Range(Some(r)) if r.eq_ignore_ascii_case("all") => {
                load_entries_between(&pool.conn, None)?
            }
            ExportScope::Range(Some(r)) => {
                load_entries_between(&pool.conn, Some(parse_range(r)?))?
            }
            ExportScope::Window {
                project_id,
                window_id,
            } => {
                let window = load_project_window(&pool.conn, *project_id, *window_id)?
                    .ok_or(AppError::NoBillingWindow(*project_id))?;
                load_project_entries(&pool.conn, *project_id, window.date, window.end_date)?
            }
        };

        if views.is_empty() {
            warning("No entries found for the selected scope. Nothing to export.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        let rows: Vec<EntryExport> = views.iter().map(EntryExport::from).collect();
        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        audit(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} entries as {}", rows.len(), format.as_str()),
        );

        Ok(rows.len())
    }
}
