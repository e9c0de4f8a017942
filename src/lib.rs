//! vox-analysis - Analysis tooling for the Voice AI project
//!
//! Loads project configuration from `.env.local` files with default
//! fallback, and pulls conversation logs out of the hosted database for
//! inspection and CSV export.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::AnalysisError;
pub use infrastructure::ConfigStore;
