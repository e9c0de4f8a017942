//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands};
pub use output::{format_env_list, format_log_rows, format_summary, format_table_rows};
