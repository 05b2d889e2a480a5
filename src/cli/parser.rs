use clap::{Parser, Subcommand};

/// Command-line interface definition for fieldsync
/// CLI application to record work periods offline and sync them to a remote store
#[derive(Parser)]
#[command(
    name = "fieldsync",
    version = env!("CARGO_PKG_VERSION"),
    about = "Offline-first work period logger: queue locally, reconcile remotely",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the owner identity from the config file
    #[arg(global = true, long = "owner")]
    pub owner: Option<String>,

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

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
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

    /// Print the internal audit log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Queue a clock-in event
    ClockIn {
        /// Date of the event (YYYY-MM-DD), defaults to today
        #[arg(long = "date")]
        date: Option<String>,

        /// Clock-in time (HH:MM)
        time: String,

        #[arg(long = "lat", requires = "lon")]
        lat: Option<f64>,

        #[arg(long = "lon", requires = "lat")]
        lon: Option<f64>,
    },

    /// Queue a clock-out event
    ClockOut {
        /// Date of the event (YYYY-MM-DD), defaults to today
        #[arg(long = "date")]
        date: Option<String>,

        /// Clock-out time (HH:MM)
        time: String,

        /// Server id of the attendance record, if the clock-in was recorded online
        #[arg(long = "record-id")]
        record_id: Option<String>,

        /// Queue id of the matching pending clock-in entry
        #[arg(long = "clock-in-entry")]
        clock_in_entry: Option<i64>,

        #[arg(long = "lat", requires = "lon")]
        lat: Option<f64>,

        #[arg(long = "lon", requires = "lat")]
        lon: Option<f64>,
    },

    /// Queue a complete work period
    Add {
        /// Date of the work period (YYYY-MM-DD)
        date: String,

        /// Start time (HH:MM)
        start: String,

        /// Finish time (HH:MM)
        finish: String,

        /// Project code the period was worked against
        #[arg(long = "project", conflicts_with = "on_equipment")]
        project: Option<String>,

        /// Equipment number the period was worked on instead of a project
        #[arg(long = "on-equipment")]
        on_equipment: Option<String>,

        /// Break interval HH:MM-HH:MM[:REASON], repeatable
        #[arg(long = "break", value_name = "SPEC")]
        breaks: Vec<String>,

        /// Used equipment number, repeatable
        #[arg(long = "equipment", value_name = "NUMBER")]
        equipment: Vec<String>,

        /// Mobilised equipment number, repeatable
        #[arg(long = "mobilised", value_name = "NUMBER")]
        mobilised: Vec<String>,

        /// Allowance code, repeatable
        #[arg(long = "allowance", value_name = "CODE")]
        allowances: Vec<String>,

        /// Record status (default: submitted)
        #[arg(long = "status")]
        status: Option<String>,
    },

    /// Import a legacy record with an aggregate break duration
    Import {
        /// Date of the work period (YYYY-MM-DD)
        date: String,

        /// Start time (HH:MM)
        start: String,

        /// Finish time (HH:MM)
        finish: String,

        /// Total break duration in minutes (will be split into intervals)
        break_minutes: i64,

        /// Project code the period was worked against
        #[arg(long = "project", conflicts_with = "on_equipment")]
        project: Option<String>,

        /// Equipment number the period was worked on instead of a project
        #[arg(long = "on-equipment")]
        on_equipment: Option<String>,

        /// Allowance code, repeatable
        #[arg(long = "allowance", value_name = "CODE")]
        allowances: Vec<String>,
    },

    /// Drain the pending queue against the remote store
    Sync,

    /// Show how many entries are waiting to be synced
    Status,

    /// Manage the locally cached equipment catalog
    Catalog {
        #[arg(long = "add", help = "Add or update a catalog entry", requires_all = ["number", "id"])]
        add: bool,

        #[arg(long = "number", help = "Equipment number")]
        number: Option<String>,

        #[arg(long = "id", help = "Server id of the equipment")]
        id: Option<String>,

        #[arg(long = "desc", help = "Equipment description")]
        desc: Option<String>,

        #[arg(long = "list", help = "List cached equipment")]
        list: bool,
    },
}
