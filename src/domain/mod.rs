//! Domain layer - Configuration entries and fetched table data

pub mod expand;
pub mod mask;
pub mod snapshot;
pub mod table;
pub mod text_log;

pub use expand::{expand_references, mark_references};
pub use mask::{display_value, is_sensitive_key, mask_value};
pub use snapshot::{ConfigEntry, EnvSnapshot, MergePolicy};
pub use table::{Row, TableRows};
pub use text_log::{sample_transcriptions, LogSummary, Speaker, TextLog};
