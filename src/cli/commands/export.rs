use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportScope};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        project,
        window,
        force,
    } = cmd
    {
        let scope = match project {
            Some(project_id) => ExportScope::Window {
                project_id: *project_id,
                window_id: *window,
            },
            None => ExportScope::Range(range.clone()),
        };

        let pool = DbPool::open(&cfg.database)?;
        ExportLogic::export(&pool, *format, file, &scope, *force)?;
    }
    Ok(())
}
