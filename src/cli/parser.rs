use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for timepiece
#[derive(Parser)]
#[command(
    name = "timepiece",
    version = env!("CARGO_PKG_VERSION"),
    about = "Time tracking CLI: clock in/out of projects, summarize hours and derive billing windows",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this user instead of the configured one
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or edit the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use (overrides $EDITOR/$VISUAL)")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage businesses
    Business {
        #[command(subcommand)]
        action: BusinessAction,
    },

    /// Manage activities (required when clocking out)
    Activity {
        #[command(subcommand)]
        action: ActivityAction,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Manage a project's billing repeat period
    Period {
        #[command(subcommand)]
        action: PeriodAction,
    },

    /// Clock into a project
    In {
        /// Project id
        project: i64,

        #[arg(long = "activity", help = "Activity id")]
        activity: Option<i64>,

        #[arg(long = "pause-open", help = "Pause your other running entries")]
        pause_open: bool,

        #[arg(long = "at", help = "Clock-in instant (YYYY-MM-DD HH:MM or HH:MM), default now")]
        at: Option<String>,
    },

    /// Clock out of an open entry
    Out {
        /// Entry id
        entry: i64,

        #[arg(long = "activity", help = "Activity id")]
        activity: i64,

        #[arg(long = "comments", default_value = "")]
        comments: String,

        #[arg(long = "at", help = "Clock-out instant (YYYY-MM-DD HH:MM or HH:MM), default now")]
        at: Option<String>,
    },

    /// Pause a running entry, or resume a paused one
    Pause {
        /// Entry id
        entry: i64,

        #[arg(long = "at", help = "Instant of the toggle, default now")]
        at: Option<String>,
    },

    /// Add, edit, delete or list entries
    Entry {
        #[command(subcommand)]
        action: EntryAction,
    },

    /// Hours per project and in total
    Summary {
        #[arg(long = "from", help = "First day (YYYY-MM-DD) of entries to include")]
        from: Option<String>,

        #[arg(long = "to", help = "Last day (YYYY-MM-DD) entries must end on")]
        to: Option<String>,
    },

    /// Billing windows
    Windows {
        #[command(subcommand)]
        action: WindowsAction,
    },

    /// Time sheet of a project for one billing window
    Sheet {
        /// Project id
        project: i64,

        #[arg(long = "window", help = "Billing window id (default: latest)")]
        window: Option<i64>,
    },

    /// Export entries
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Output file (absolute path)")]
        file: String,

        /// Date range to export: YYYY, YYYY-MM, YYYY-MM-DD, start:end ranges
        /// in the same formats, or `all` (default)
        #[arg(long, value_name = "RANGE", conflicts_with = "project")]
        range: Option<String>,

        #[arg(long, help = "Export a project's billing window instead of a range")]
        project: Option<i64>,

        #[arg(long, requires = "project", help = "Billing window id (default: latest)")]
        window: Option<i64>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE", help = "Destination file (absolute path)")]
        file: String,

        #[arg(long, help = "Compress the backup to .zip")]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum BusinessAction {
    /// Create a business
    Add { name: String },
    /// List businesses
    List,
}

#[derive(Subcommand)]
pub enum ActivityAction {
    /// Create an activity
    Add { code: String, name: String },
    /// List activities
    List,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a project
    Add {
        /// Business id
        business: i64,
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit a project
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        business: Option<i64>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List projects, optionally searching name and description
    List {
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Show a project and its repeat period
    Show { id: i64 },
}

#[derive(Subcommand)]
pub enum PeriodAction {
    /// Create or update the repeat period of a project
    Set {
        /// Project id
        project: i64,

        #[arg(long, help = "Intervals per window (default 1, kept on update)")]
        count: Option<i64>,

        #[arg(long, help = "day, week, month or year (default from config, kept on update)")]
        interval: Option<String>,

        #[arg(long, help = "First window start (YYYY-MM-DD), default today")]
        start: Option<String>,

        #[arg(long, help = "Keep the period but exclude it from window refreshes")]
        inactive: bool,
    },
    /// Show the repeat period of a project
    Show {
        /// Project id
        project: i64,
    },
}

#[derive(Subcommand)]
pub enum EntryAction {
    /// Record a past entry
    Add {
        /// Project id
        project: i64,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        activity: Option<i64>,
        #[arg(long, default_value = "")]
        comments: String,
    },
    /// Update a closed entry
    Edit {
        id: i64,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        project: Option<i64>,
        #[arg(long)]
        activity: Option<i64>,
        #[arg(long)]
        comments: Option<String>,
    },
    /// Delete an entry (asks for confirmation unless --key is given)
    Del {
        id: i64,
        #[arg(long)]
        key: Option<String>,
    },
    /// List your recent entries
    List {
        #[arg(long, help = "How many days back (default from config)")]
        days: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum WindowsAction {
    /// Generate missing billing windows for every active period
    Refresh {
        #[arg(long, help = "Reference day (YYYY-MM-DD), default today")]
        date: Option<String>,
    },
    /// List the billing windows of a project
    List {
        /// Project id
        project: i64,
    },
}
