use crate::cli::parser::{Commands, ProjectAction};
use crate::config::Config;
use crate::core::projects::ProjectLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::project::Project;
use crate::models::repeat_period::RepeatPeriod;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::date::format_date;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Project { action } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;

        match action {
            ProjectAction::Add {
                business,
                name,
                description,
            } => {
                let p = ProjectLogic::create_project(&mut pool, *business, name, description)?;
                success(format!(
                    "Project #{} '{}' created for {}.",
                    p.id, p.name, p.business_name
                ));
            }
            ProjectAction::Edit {
                id,
                name,
                business,
                description,
            } => {
                let p = ProjectLogic::edit_project(
                    &mut pool,
                    *id,
                    name.as_deref(),
                    *business,
                    description.as_deref(),
                )?;
                success(format!("Project #{} updated.", p.id));
                print_project(&p, None);
            }
            ProjectAction::List { search } => {
                let projects = ProjectLogic::list_projects(&pool, search.as_deref())?;

                // A search that narrows down to one project opens it directly.
                if search.is_some() && projects.len() == 1 {
                    let (p, period) = ProjectLogic::view_project(&pool, projects[0].id)?;
                    print_project(&p, period.as_ref());
                    return Ok(());
                }

                if projects.is_empty() {
                    info("No projects found.");
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column::new("ID", 6),
                    Column::new("Project", 28),
                    Column::new("Business", 22),
                    Column::new("Description", 40),
                ]);
                for p in projects {
                    table.add_row(vec![p.id.to_string(), p.name, p.business_name, p.description]);
                }
                print!("{}", table.render());
            }
            ProjectAction::Show { id } => {
                let (p, period) = ProjectLogic::view_project(&pool, *id)?;
                print_project(&p, period.as_ref());
            }
        }
    }
    Ok(())
}

fn print_project(p: &Project, period: Option<&RepeatPeriod>) {
    header(format!("Project #{} {}", p.id, p.name));
    println!("{CYAN}Business:{RESET}    #{} {}", p.business_id, p.business_name);
    if p.description.is_empty() {
        println!("{CYAN}Description:{RESET} {GREY}--{RESET}");
    } else {
        println!("{CYAN}Description:{RESET} {}", p.description);
    }

    match period {
        Some(rp) => println!(
            "{CYAN}Billing:{RESET}     {} from {}{}",
            rp.describe(),
            format_date(&rp.anchor_date),
            if rp.active { "" } else { " (inactive)" }
        ),
        None => println!("{CYAN}Billing:{RESET}     {GREY}no repeat period{RESET}"),
    }
}
