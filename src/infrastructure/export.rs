//! CSV export of fetched log rows

use crate::domain::table::cell_text;
use crate::domain::{TableRows, TextLog};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Files with this suffix are meant to be committed alongside the analysis
pub const EXPORT_SUFFIX: &str = "_sample.forgit.csv";

const HEADER: [&str; 9] = [
    "id",
    "session_id",
    "client_id",
    "timestamp",
    "type",
    "text",
    "is_transcription",
    "source",
    "created_at",
];

/// `<project root>/data/<table>_sample.forgit.csv`
pub fn default_export_path(project_root: &Path, table: &str) -> PathBuf {
    project_root
        .join("data")
        .join(format!("{}{}", table, EXPORT_SUFFIX))
}

/// Write log rows as CSV, creating parent directories as needed
pub fn write_csv(path: &Path, logs: &[TextLog]) -> Result<()> {
    write_file(path, &render_csv(logs), logs.len())
}

/// Write untyped rows as CSV with one column per known column name
pub fn write_table_csv(path: &Path, table: &TableRows) -> Result<()> {
    write_file(path, &render_table_csv(table), table.len())
}

fn write_file(path: &Path, contents: &str, rows: usize) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            info!(dir = %parent.display(), "creating export directory");
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, contents)?;
    info!(path = %path.display(), rows, "saved rows");
    Ok(())
}

/// Render rows as RFC 4180 CSV with a header line
pub fn render_csv(logs: &[TextLog]) -> String {
    let mut out = HEADER.join(",");
    out.push('\n');

    for log in logs {
        let fields = [
            log.id.to_string(),
            escape(&log.session_id),
            escape(&log.client_id),
            log.timestamp.to_string(),
            log.kind.to_string(),
            escape(&log.text),
            log.is_transcription.map(|b| b.to_string()).unwrap_or_default(),
            log.source.as_deref().map(escape).unwrap_or_default(),
            log.created_at.to_rfc3339(),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// Render untyped rows; nested values are written as JSON
pub fn render_table_csv(table: &TableRows) -> String {
    let header: Vec<String> = table.columns.iter().map(|c| escape(c)).collect();
    let mut out = header.join(",");
    out.push('\n');

    for row in &table.rows {
        let fields: Vec<String> = table
            .columns
            .iter()
            .map(|c| escape(&cell_text(row, c)))
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
