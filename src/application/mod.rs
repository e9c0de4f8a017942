//! Application layer - Use cases and orchestration

pub mod fetch_logs;
pub mod manage_config;

pub use fetch_logs::{FetchLogsService, FetchOptions, FetchReport, TableReport};
pub use manage_config::{ConfigService, EnvLine};
