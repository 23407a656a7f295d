use clap::{Parser, Subcommand};

use crate::export::ExportFormat;

/// Command-line interface definition for rtagger
/// CLI client for TimeTagger-compatible time tracking servers
#[derive(Parser)]
#[command(
    name = "rtagger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track time against a TimeTagger server: start/stop timers, list and tag records, and get alerts for forgotten running timers",
    long_about = None
)]
pub struct Cli {
    /// Override the configuration directory (useful for tests or multiple
    /// accounts)
    #[arg(global = true, long = "config-dir")]
    pub config_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration directory and default config file
    Init,

    /// Verify and store server connection details
    Login {
        /// Server URL, e.g. https://timetagger.app/
        #[arg(long, value_name = "URL")]
        url: String,

        /// API token (copy it from the server's account page)
        #[arg(long, value_name = "TOKEN")]
        token: String,

        /// Save the details without probing the server first
        #[arg(long = "no-verify")]
        no_verify: bool,
    },

    /// Forget the stored token and per-session state
    Logout,

    /// Manage the configuration file (view or edit)
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL).
        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Start a new timer
    Start {
        /// Record description; tags are #-prefixed words (e.g. "write
        /// report #client"). Omit to reuse the last started description.
        description: Option<String>,
    },

    /// Stop a running timer
    Stop {
        /// Key of the record to stop; omit to stop the first running record
        key: Option<String>,
    },

    /// List records
    List {
        /// Filter by period.
        ///
        /// Supported formats:
        /// - YYYY                  → entire year (e.g. "2025")
        /// - YYYY-MM               → entire month (e.g. "2025-06")
        /// - YYYY-MM-DD            → specific day (e.g. "2025-06-18")
        ///
        /// Ranges (start:end) in the same format, and the special value
        /// `all` for the whole archive.
        ///
        /// If omitted, the default is the configured lookback window
        /// (last 7 days unless changed).
        #[arg(
            long,
            short,
            help = "Filter by year/month/day or a custom range (YYYY, YYYY-MM, YYYY-MM-DD, or ranges)"
        )]
        period: Option<String>,

        /// Show only today's records
        #[arg(long, conflicts_with = "period")]
        today: bool,

        /// Show this month's records
        #[arg(long, conflicts_with_all = ["period", "today"])]
        month: bool,

        /// Case-insensitive text filter on descriptions, applied locally
        /// without another server round trip
        #[arg(long, short)]
        search: Option<String>,

        /// Include record keys in the output
        #[arg(long)]
        keys: bool,
    },

    /// Edit an existing record
    Edit {
        /// Key of the record to edit
        key: String,

        /// New description
        #[arg(long = "desc", value_name = "TEXT")]
        description: Option<String>,

        /// New start, local time "YYYY-MM-DD HH:MM"
        #[arg(long = "start", value_name = "DATETIME")]
        start: Option<String>,

        /// New end, local time "YYYY-MM-DD HH:MM"
        #[arg(long = "end", value_name = "DATETIME")]
        end: Option<String>,
    },

    /// Delete a record (hidden server-side, not erased)
    Del {
        /// Key of the record to delete
        key: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show the most used tags in the active window
    Tags {
        /// Maximum number of suggestions
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Same period syntax as `list`
        #[arg(long, short)]
        period: Option<String>,
    },

    /// Run one zombie-timer check (for cron or systemd timers)
    Check,

    /// Keep checking for forgotten running timers
    Watch {
        /// Minutes between checks
        #[arg(long, default_value_t = 15)]
        interval: u64,
    },

    /// Export records in various formats
    Export {
        /// Export format: csv, json
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Same period syntax as `list`
        #[arg(long, value_name = "RANGE")]
        period: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}
