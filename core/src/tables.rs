use serde_json::{Map, Value};

use crate::config::NormalizerConfig;
use crate::message::Table;

pub const MAX_WALK_DEPTH: usize = 32;
/// Placeholder for null or absent cells.
pub const EMPTY_CELL: &str = "—";

/// Every non-empty array of objects in the payload becomes a table, titled by
/// the key that holds it. Walk order follows the payload's key order; a
/// parent table comes before tables nested in its rows.
pub fn extract(payload: &Value, config: &NormalizerConfig) -> Vec<Table> {
    let mut tables = Vec::new();
    walk(payload, None, false, 0, config, &mut tables);
    tables
}

fn walk(
    value: &Value,
    title: Option<&str>,
    debug: bool,
    depth: usize,
    config: &NormalizerConfig,
    tables: &mut Vec<Table>,
) {
    if depth > MAX_WALK_DEPTH {
        tracing::trace!(depth, "table walk depth limit reached");
        return;
    }
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_debug = debug || config.debug_tables.matches(key);
                walk(child, Some(key.as_str()), child_debug, depth + 1, config, tables);
            }
        }
        Value::Array(items) => {
            let rows: Vec<&Map<String, Value>> =
                items.iter().filter_map(Value::as_object).collect();
            if !rows.is_empty() && rows.len() == items.len() {
                tables.push(Table {
                    title: title.map(str::to_string),
                    columns: column_union(&rows),
                    rows: rows.into_iter().cloned().collect(),
                    debug,
                });
            }
            for item in items {
                walk(item, title, debug, depth + 1, config, tables);
            }
        }
        _ => {}
    }
}

fn column_union(rows: &[&Map<String, Value>]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for key in rows.iter().flat_map(|row| row.keys()) {
        if !columns.iter().any(|c| c == key) {
            columns.push(key.clone());
        }
    }
    columns
}

/// Cell text: `—` for null/absent, compact JSON for nested values, the
/// string itself for strings, JSON text for other primitives.
pub fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => EMPTY_CELL.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(nested @ (Value::Object(_) | Value::Array(_))) => {
            serde_json::to_string(nested).unwrap_or_default()
        }
        Some(other) => other.to_string(),
    }
}

impl Table {
    /// Rendered cell at `row` / `column`; out-of-range lookups render as empty.
    pub fn cell(&self, row: usize, column: &str) -> String {
        render_cell(self.rows.get(row).and_then(|r| r.get(column)))
    }
}
