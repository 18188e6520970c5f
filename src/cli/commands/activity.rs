use crate::cli::parser::{ActivityAction, Commands};
use crate::config::Config;
use crate::core::projects::ProjectLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Activity { action } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;

        match action {
            ActivityAction::Add { code, name } => {
                let a = ProjectLogic::create_activity(&mut pool, code, name)?;
                success(format!("Activity #{} [{}] {} created.", a.id, a.code, a.name));
            }
            ActivityAction::List => {
                let mut table = Table::new(vec![
                    Column::new("ID", 6),
                    Column::new("Code", 12),
                    Column::new("Name", 40),
                ]);
                for a in ProjectLogic::activities(&pool)? {
                    table.add_row(vec![a.id.to_string(), a.code, a.name]);
                }

                if table.is_empty() {
                    info("No activities yet.");
                } else {
                    print!("{}", table.render());
                }
            }
        }
    }
    Ok(())
}
