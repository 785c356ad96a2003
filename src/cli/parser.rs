use clap::{Parser, Subcommand};

/// Command-line interface definition for hallpass
/// CLI application to track restroom passes with SQLite
#[derive(Parser)]
#[command(
    name = "hallpass",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple restroom pass CLI: track passes, waiting lines, and per-period usage limits using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override roster CSV path
    #[arg(global = true, long = "roster")]
    pub roster: Option<String>,

    /// Override the double-submission cooldown window in seconds
    #[arg(global = true, long = "cooldown", hide = true)]
    pub cooldown: Option<i64>,

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
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Show every student's current status (roster joined with the log)
    Status {
        /// Emit machine-readable JSON instead of a table
        #[arg(long = "json")]
        json: bool,
    },

    /// Mark a student out (request a pass)
    Out {
        /// Student name (as it appears on the roster)
        student: String,

        /// Lane category: G (girls) or B (boys)
        category: String,

        /// Approving teacher's name
        #[arg(long = "teacher", short = 't')]
        teacher: String,

        /// Override the wall-clock time, HH:MM (mainly for tests)
        #[arg(long = "at", hide = true)]
        at: Option<String>,
    },

    /// Mark a student back (return a pass)
    Back {
        /// Student name
        student: String,

        /// Approving teacher's name
        #[arg(long = "teacher", short = 't')]
        teacher: String,

        /// Lane category (only needed when no open pass exists)
        #[arg(long = "category", short = 'c')]
        category: Option<String>,

        /// Override the wall-clock time, HH:MM (mainly for tests)
        #[arg(long = "at", hide = true)]
        at: Option<String>,
    },

    /// Show the waiting lines
    Queue {
        /// Limit to one lane category: G or B
        #[arg(long = "category", short = 'c')]
        category: Option<String>,
    },

    /// Check the usage-limit policy for a student
    Check {
        /// Student name
        student: String,

        /// Override the wall-clock time, HH:MM (mainly for tests)
        #[arg(long = "at", hide = true)]
        at: Option<String>,

        /// Emit machine-readable JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Print raw rows from the pass log
    Log {
        #[arg(long = "print", help = "Print rows from the pass log")]
        print: bool,

        /// Limit to one date (YYYY-MM-DD)
        #[arg(long = "date")]
        date: Option<String>,
    },
}
