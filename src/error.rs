//! Error types for vox-analysis

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for vox-analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Configuration error: '{0}' is not set and no default value was provided")]
    ConfigurationMissing(String),

    #[error("Invalid configuration key: '{0}'")]
    InvalidKey(String),

    #[error("Failed to load {}: {source}", .path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database returned HTTP {status}: {body}")]
    Database { status: u16, body: String },

    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalysisError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            AnalysisError::ConfigurationMissing(_) => 2,
            AnalysisError::EnvFile { .. } => 3,
            AnalysisError::Http(_) | AnalysisError::Database { .. } => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            AnalysisError::ConfigurationMissing(key) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Add '{}=<value>' to your .env.local file\n\
                    • Export {} in your shell before running\n\
                    • Point at another file with --env-file or VOX_ENV_FILE",
                    self, key, key
                )
            }
            AnalysisError::EnvFile { path, .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Each line of {} must look like KEY=VALUE\n\
                    • Quote values containing spaces or '#'",
                    self,
                    path.display()
                )
            }
            AnalysisError::InvalidUrl(_) => {
                format!(
                    "{}\n\n\
                    Expected format: https://<project>.supabase.co\n\
                    Check NEXT_PUBLIC_SUPABASE_URL in your .env.local",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using AnalysisError
pub type Result<T> = std::result::Result<T, AnalysisError>;
