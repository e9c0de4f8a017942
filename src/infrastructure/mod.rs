//! Infrastructure layer - External I/O: env files, the database, exports

pub mod config;
pub mod export;
pub mod logging;
pub mod supabase;

pub use config::ConfigStore;
pub use export::{default_export_path, write_csv, write_table_csv};
pub use logging::init_logging;
pub use supabase::{RowQuery, SupabaseClient, TEXT_LOGS_TABLE};
