//! Fetch recent rows use cases

use crate::domain::{LogSummary, Row, TableRows, TextLog};
use crate::error::Result;
use crate::infrastructure::{write_csv, write_table_csv, RowQuery, SupabaseClient};
use std::path::PathBuf;

/// Options for a single fetch
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub query: RowQuery,
    /// Write the rows to this CSV file when set
    pub export: Option<PathBuf>,
}

/// What a `text_logs` fetch produced
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub logs: Vec<TextLog>,
    pub summary: LogSummary,
    pub exported: Option<PathBuf>,
}

/// What a fetch from any other table produced
#[derive(Debug, Clone)]
pub struct TableReport {
    pub table: TableRows,
    pub exported: Option<PathBuf>,
}

/// Service for pulling rows out of the database
pub struct FetchLogsService {
    client: SupabaseClient,
}

impl FetchLogsService {
    pub fn new(client: SupabaseClient) -> Self {
        FetchLogsService { client }
    }

    /// Fetch `text_logs` rows into the typed model
    pub async fn execute(&self, options: FetchOptions) -> Result<FetchReport> {
        // 1. Query newest rows
        let logs: Vec<TextLog> = self.client.fetch_rows(&options.query).await?;

        // 2. Summarise
        let summary = LogSummary::from_logs(&logs);

        // 3. Export when requested
        if let Some(path) = &options.export {
            write_csv(path, &logs)?;
        }

        Ok(FetchReport {
            logs,
            summary,
            exported: options.export,
        })
    }

    /// Fetch rows of any table without assuming its columns
    pub async fn execute_table(&self, options: FetchOptions) -> Result<TableReport> {
        let rows: Vec<Row> = self.client.fetch_rows(&options.query).await?;
        let table = TableRows::from_rows(rows);

        if let Some(path) = &options.export {
            write_table_csv(path, &table)?;
        }

        Ok(TableReport {
            table,
            exported: options.export,
        })
    }
}
