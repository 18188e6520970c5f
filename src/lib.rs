//! timepiece library root.
//! Exposes the CLI parser, the high-level `run()` function and the domain
//! modules (entries, projects, repeat periods and billing windows).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cmd = &cli.command;
    match cmd {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(cmd, cfg),
        Commands::Db { .. } => commands::db::handle(cmd, cfg),
        Commands::Log { .. } => commands::log::handle(cmd, cfg),
        Commands::Business { .. } => commands::business::handle(cmd, cfg),
        Commands::Activity { .. } => commands::activity::handle(cmd, cfg),
        Commands::Project { .. } => commands::project::handle(cmd, cfg),
        Commands::Period { .. } => commands::period::handle(cmd, cfg),
        Commands::In { .. } | Commands::Out { .. } | Commands::Pause { .. } => {
            commands::clock::handle(cmd, cfg)
        }
        Commands::Entry { .. } => commands::entry::handle(cmd, cfg),
        Commands::Summary { .. } => commands::summary::handle(cmd, cfg),
        Commands::Windows { .. } => commands::windows::handle(cmd, cfg),
        Commands::Sheet { .. } => commands::sheet::handle(cmd, cfg),
        Commands::Export { .. } => commands::export::handle(cmd, cfg),
        Commands::Backup { .. } => commands::backup::handle(cmd, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // In test mode the user's config file is neither read nor written.
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(user) = &cli.user {
        cfg.user = user.clone();
    }

    dispatch(&cli, &cfg)
}
