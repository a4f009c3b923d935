//! Text harvesting for A2A task envelopes.
//!
//! The agent backend answers with a JSON-RPC style body whose `result` holds
//! the task: `status { state, timestamp }`, `artifacts[].parts[]` and
//! `history[] { role, parts[] }`, where text parts look like
//! `{ "kind": "text", "text": "…" }`.

use serde_json::Value;

use crate::accessor::{array_field, field, scopes, text_field};

pub const RESULT_KEY: &str = "result";
const MAX_PART_DEPTH: usize = 6;
const UNKNOWN_STATE: &str = "unknown";

/// The task object under `result`, at the top level or under `data`.
pub fn task_result(payload: &Value) -> Option<&Value> {
    scopes(payload)
        .into_iter()
        .find_map(|scope| field(scope, RESULT_KEY).filter(|r| looks_like_task(r)))
}

fn looks_like_task(result: &Value) -> bool {
    result.is_object()
        && (field(result, "status").is_some()
            || field(result, "artifacts").is_some()
            || field(result, "history").is_some())
}

/// Every `kind == "text"` part under `value`, depth-first.
pub fn part_texts(value: &Value) -> Vec<String> {
    let mut texts = Vec::new();
    collect_part_texts(value, 0, &mut texts);
    texts
}

fn collect_part_texts(value: &Value, depth: usize, texts: &mut Vec<String>) {
    if depth > MAX_PART_DEPTH {
        return;
    }
    match value {
        Value::Object(map) => {
            if map.get("kind").and_then(Value::as_str) == Some("text") {
                if let Some(text) = text_field(value, "text") {
                    texts.push(text.to_string());
                }
            }
            for child in map.values() {
                collect_part_texts(child, depth + 1, texts);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_part_texts(item, depth + 1, texts);
            }
        }
        _ => {}
    }
}

/// Best-effort answer texts: artifact parts, else history parts, else a
/// plain `text` on the task.
pub fn answer_texts(result: &Value) -> Vec<String> {
    for key in ["artifacts", "history"] {
        let texts = field(result, key).map(part_texts).unwrap_or_default();
        if !texts.is_empty() {
            return texts;
        }
    }
    text_field(result, "text")
        .map(|text| vec![text.to_string()])
        .unwrap_or_default()
}

/// Human-readable status block for a task:
///
/// ```text
/// Статус: completed @ 2025-01-01T00:00:00Z
///
/// Ответ:
/// <artifact texts>
///
/// История:
/// • user: <texts joined by " / ">
/// ```
pub fn format_task_summary(result: &Value) -> String {
    let status = field(result, "status");
    let state = status
        .and_then(|s| text_field(s, "state"))
        .unwrap_or(UNKNOWN_STATE);
    let timestamp = status.and_then(|s| text_field(s, "timestamp"));

    let mut lines = Vec::new();
    match timestamp {
        Some(ts) => lines.push(format!("Статус: {state} @ {ts}")),
        None => lines.push(format!("Статус: {state}")),
    }

    let artifact_texts: Vec<String> = array_field(result, "artifacts")
        .into_iter()
        .flatten()
        .flat_map(|artifact| array_field(artifact, "parts").into_iter().flatten())
        .filter(|part| part.get("kind").and_then(Value::as_str) == Some("text"))
        .filter_map(|part| text_field(part, "text"))
        .map(str::to_string)
        .collect();
    if !artifact_texts.is_empty() {
        lines.push("\nОтвет:".to_string());
        lines.push(artifact_texts.join("\n\n"));
    }

    let history_lines: Vec<String> = array_field(result, "history")
        .into_iter()
        .flatten()
        .filter(|entry| entry.is_object())
        .filter_map(|entry| {
            let texts: Vec<&str> = array_field(entry, "parts")
                .into_iter()
                .flatten()
                .filter(|part| part.get("kind").and_then(Value::as_str) == Some("text"))
                .filter_map(|part| text_field(part, "text"))
                .collect();
            if texts.is_empty() {
                return None;
            }
            let role = text_field(entry, "role").unwrap_or("message");
            Some(format!("• {role}: {}", texts.join(" / ")))
        })
        .collect();
    if !history_lines.is_empty() {
        lines.push("\nИстория:".to_string());
        lines.push(history_lines.join("\n"));
    }

    lines.join("\n").trim().to_string()
}
