use crate::cli::filters::{FilterArgs, SourceArgs};
use crate::core::join::JoinMode;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for LeadLens
/// CLI dashboard for per-project leads merged with web analytics
#[derive(Parser)]
#[command(
    name = "leadlens",
    version = env!("CARGO_PKG_VERSION"),
    about = "Lead engagement dashboard: merge lead sheets with web events, filter, score intent",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        #[arg(long, short = 'f', help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "List configuration keys missing from the file")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing keys with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Fetch every lead source and report rows / failures per project
    Sources {
        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Show KPIs, charts and the filtered lead table
    Dashboard {
        #[command(flatten)]
        sources: SourceArgs,

        #[command(flatten)]
        filters: FilterArgs,

        /// Web events export (.xlsx with a "Main" sheet, or .csv)
        #[arg(long = "events", value_name = "FILE")]
        events: Option<String>,

        /// Join mode for the web events merge
        #[arg(long = "join", value_enum)]
        join: Option<JoinMode>,

        /// Comma separated list of columns to show in the lead table
        #[arg(long = "columns", value_name = "A,B,...")]
        columns: Option<String>,

        /// Maximum number of rows in the lead table (0 = all)
        #[arg(long = "limit", value_name = "N")]
        limit: Option<usize>,

        /// Print the summary as JSON instead of the terminal dashboard
        #[arg(long = "json")]
        json: bool,
    },

    /// Export the filtered, scored lead table
    Export {
        #[command(flatten)]
        sources: SourceArgs,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long = "events", value_name = "FILE")]
        events: Option<String>,

        #[arg(long = "join", value_enum)]
        join: Option<JoinMode>,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
