//! CLI command definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vox-analysis")]
#[command(about = "Voice AI analysis tooling", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Env file to load (default: nearest .env.local)
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Which value wins on key collisions (file, ambient)
    #[arg(long, global = true, default_value = "file")]
    pub precedence: String,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available environment variables
    Env {
        /// Show secret values unmasked
        #[arg(long)]
        reveal: bool,
    },

    /// Print a single configuration value
    Get {
        /// Variable name
        key: String,

        /// Value to print when the variable is not set
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Fetch recent rows (text_logs by default, any table with --table)
    Logs {
        /// Table to query; tables other than text_logs are shown column by column
        #[arg(long, default_value = "text_logs")]
        table: String,

        /// Column to order by, newest first
        #[arg(long, default_value = "created_at")]
        order_by: String,

        /// Number of rows to fetch
        #[arg(short, long, default_value_t = 100)]
        limit: usize,

        /// Number of rows and transcriptions to print
        #[arg(short, long, default_value_t = 5)]
        sample: usize,

        /// Save rows as CSV under data/ next to the env file
        #[arg(long)]
        export: bool,

        /// Save rows as CSV to this path instead
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}
