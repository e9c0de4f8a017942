//! Output formatting utilities

use crate::application::EnvLine;
use crate::domain::table::cell_text;
use crate::domain::{sample_transcriptions, LogSummary, TableRows, TextLog};

/// Format environment entries for display
pub fn format_env_list(lines: &[EnvLine]) -> String {
    if lines.is_empty() {
        return "No environment variables found".to_string();
    }

    let mut output = String::from("Available environment variables:\n");
    for line in lines {
        output.push_str(&format!("- {}: {}\n", line.key, line.value));
    }
    output
}

/// Format the first `limit` rows, one per line
pub fn format_log_rows(logs: &[TextLog], limit: usize) -> String {
    if logs.is_empty() {
        return "No rows returned".to_string();
    }

    let mut output = String::new();
    for log in logs.iter().take(limit) {
        output.push_str(&format!(
            "{}  {:<9}  {}  {}\n",
            log.created_at.format("%Y-%m-%d %H:%M:%S"),
            log.kind.to_string(),
            log.session_id,
            truncate(&log.text, 60)
        ));
    }
    output
}

/// Format summary statistics plus a sample of transcriptions
pub fn format_summary(summary: &LogSummary, logs: &[TextLog], sample: usize) -> String {
    let mut output = String::from("Logs by type:\n");
    for (kind, count) in &summary.by_type {
        output.push_str(&format!("  {:<9}  {}\n", kind.to_string(), count));
    }
    output.push_str(&format!("Sessions: {}\n", summary.sessions));
    if let (Some(first), Some(last)) = (summary.earliest, summary.latest) {
        output.push_str(&format!(
            "Range: {} .. {}\n",
            first.to_rfc3339(),
            last.to_rfc3339()
        ));
    }
    output.push_str(&format!("Number of transcriptions: {}\n", summary.transcriptions));

    let transcriptions = sample_transcriptions(logs, sample);
    if !transcriptions.is_empty() {
        output.push_str("Sample transcriptions:\n");
        for log in transcriptions {
            output.push_str(&format!(
                "  {}  {}  {}\n",
                log.session_id,
                truncate(&log.text, 60),
                log.created_at.to_rfc3339()
            ));
        }
    }
    output
}

/// Format the first `limit` untyped rows as `column=value` pairs
pub fn format_table_rows(table: &TableRows, limit: usize) -> String {
    if table.is_empty() {
        return "No rows returned".to_string();
    }

    let mut output = format!("Columns: {}\n", table.columns.join(", "));
    for row in table.rows.iter().take(limit) {
        let cells: Vec<String> = table
            .columns
            .iter()
            .map(|c| format!("{}={}", c, truncate(&cell_text(row, c), 40)))
            .collect();
        output.push_str(&format!("  {}\n", cells.join("  ")));
    }
    output
}

fn truncate(text: &str, max: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let cut: String = single_line.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}
