use crate::cli::parser::{BusinessAction, Commands};
use crate::config::Config;
use crate::core::projects::ProjectLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Business { action } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;

        match action {
            BusinessAction::Add { name } => {
                let b = ProjectLogic::create_business(&mut pool, name)?;
                success(format!("Business #{} '{}' created.", b.id, b.name));
            }
            BusinessAction::List => {
                let mut table = Table::new(vec![Column::new("ID", 6), Column::new("Name", 40)]);
                for b in ProjectLogic::businesses(&pool)? {
                    table.add_row(vec![b.id.to_string(), b.name]);
                }

                if table.is_empty() {
                    info("No businesses yet.");
                } else {
                    print!("{}", table.render());
                }
            }
        }
    }
    Ok(())
}
