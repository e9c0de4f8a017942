//! Untyped rows from tables without a dedicated model

use serde_json::{Map, Value};

/// One row as returned by PostgREST
pub type Row = Map<String, Value>;

/// Rows plus the union of their column names
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRows {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl TableRows {
    /// Columns are listed in first-seen order across all rows
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
        TableRows { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Display form of a cell: strings unquoted, null and missing as empty,
/// everything else as compact JSON
pub fn cell_text(row: &Row, column: &str) -> String {
    match row.get(column) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
