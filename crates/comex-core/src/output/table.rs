//! Column layout for opaque comment records.

use serde_json::Value;

use crate::client::CommentRecord;

/// Union of record keys in first-seen order, so the earliest records fix the
/// leftmost columns and late-appearing fields append to the right.
pub fn column_union(records: &[CommentRecord]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut columns = Vec::new();
    for record in records {
        for key in record.keys() {
            if seen.insert(key.clone()) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// Text rendering of a cell: scalars as their natural text, nested values
/// JSON-encoded, null/missing empty.
pub fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested) => nested.to_string(),
    }
}
