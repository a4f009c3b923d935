//! Display text and narrative sources of a payload.

use serde_json::Value;

use crate::a2a;
use crate::accessor::{field, first_field, first_text, is_vacant, non_blank, scopes, text_field};

pub const NARRATIVE_KEYS: [&str; 2] = ["reasoning", "narrative"];
pub const NARRATIVE_BODY_KEYS: [&str; 4] = ["text", "summary", "reasoning", "body"];
pub const FORMATTED_KEY: &str = "formatted";
pub const TEXT_KEY: &str = "text";
pub const TOOLS_KEYS: [&str; 2] = ["tools", "tools_used"];
pub const CONFIDENCE_KEY: &str = "confidence";
pub const SUMMARY_HEADING: &str = "### Резюме";
const MAX_LEAF_DEPTH: usize = 32;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    /// Best available narrative, ready for display
    pub display: String,
    /// Every raw narrative string found, deduplicated, in priority order.
    /// Scanners read these instead of the display text so synthesized
    /// headings never count as agent prose.
    pub sources: Vec<String>,
}

#[derive(Debug)]
struct Narrative<'a> {
    body: &'a str,
    tools: Vec<String>,
    confidence: Option<String>,
}

pub fn extract(payload: &Value) -> ExtractedText {
    if let Some(text) = payload.as_str() {
        let text = text.trim().to_string();
        let sources = if text.is_empty() { Vec::new() } else { vec![text.clone()] };
        return ExtractedText { display: text, sources };
    }

    let scopes = scopes(payload);
    let narrative = scopes.iter().copied().find_map(narrative_in);
    let formatted = scopes
        .iter()
        .copied()
        .find_map(|scope| text_field(scope, FORMATTED_KEY));
    let text = scopes
        .iter()
        .copied()
        .find_map(|scope| text_field(scope, TEXT_KEY));
    let task = a2a::task_result(payload);

    let mut sources: Vec<String> = Vec::new();
    let mut push_source = |source: &str| {
        if !sources.iter().any(|s| s == source) {
            sources.push(source.to_string());
        }
    };
    if let Some(n) = &narrative {
        push_source(n.body);
    }
    // A formatted task summary repeats the user's own turns under its
    // history section; with a task present the answers are read directly.
    if task.is_none() {
        formatted.into_iter().for_each(&mut push_source);
    }
    text.into_iter().for_each(&mut push_source);
    if let Some(result) = task {
        for answer in a2a::answer_texts(result) {
            push_source(answer.as_str());
        }
    }

    let display = if let Some(n) = &narrative {
        render_narrative(n)
    } else if let Some(formatted) = formatted {
        formatted.to_string()
    } else if let Some(text) = text {
        text.to_string()
    } else if let Some(result) = task {
        a2a::format_task_summary(result)
    } else {
        for leaf in string_leaves(payload) {
            push_source(leaf);
        }
        stringify(payload)
    };

    ExtractedText { display, sources }
}

/// Every non-blank string value under `value`, depth-first, so scanners see
/// prose rather than escaped JSON.
fn string_leaves(value: &Value) -> Vec<&str> {
    let mut leaves = Vec::new();
    collect_string_leaves(value, 0, &mut leaves);
    leaves
}

fn collect_string_leaves<'a>(value: &'a Value, depth: usize, leaves: &mut Vec<&'a str>) {
    if depth > MAX_LEAF_DEPTH {
        return;
    }
    match value {
        Value::String(_) => leaves.extend(non_blank(value)),
        Value::Object(map) => map
            .values()
            .for_each(|child| collect_string_leaves(child, depth + 1, leaves)),
        Value::Array(items) => items
            .iter()
            .for_each(|item| collect_string_leaves(item, depth + 1, leaves)),
        _ => {}
    }
}

fn narrative_in(scope: &Value) -> Option<Narrative<'_>> {
    let value = first_field(scope, &NARRATIVE_KEYS)?;
    match value {
        Value::String(_) => Some(Narrative {
            body: non_blank(value)?,
            tools: tool_names(scope),
            confidence: confidence(scope),
        }),
        Value::Object(_) => {
            let body = first_text(value, &NARRATIVE_BODY_KEYS)?;
            let mut tools = tool_names(value);
            if tools.is_empty() {
                tools = tool_names(scope);
            }
            Some(Narrative {
                body,
                tools,
                confidence: confidence(value).or_else(|| confidence(scope)),
            })
        }
        _ => None,
    }
}

/// Tool names from `["a", "b"]`, `"a"` or `[{"name": "a"}]`.
fn tool_names(scope: &Value) -> Vec<String> {
    let Some(value) = first_field(scope, &TOOLS_KEYS) else {
        return Vec::new();
    };
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };
    let mut names: Vec<String> = Vec::new();
    for item in items {
        let name = non_blank(item).or_else(|| text_field(item, "name"));
        if let Some(name) = name {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

fn confidence(scope: &Value) -> Option<String> {
    match field(scope, CONFIDENCE_KEY)? {
        Value::String(s) => Some(s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn render_narrative(narrative: &Narrative<'_>) -> String {
    if narrative.tools.is_empty() && narrative.confidence.is_none() {
        return narrative.body.to_string();
    }
    let mut lines = vec![SUMMARY_HEADING.to_string()];
    if let Some(confidence) = &narrative.confidence {
        lines.push(format!("- Уверенность: {confidence}"));
    }
    if !narrative.tools.is_empty() {
        lines.push(format!("- Инструменты: {}", narrative.tools.join(", ")));
    }
    lines.push(String::new());
    lines.push(narrative.body.to_string());
    lines.join("\n")
}

fn stringify(payload: &Value) -> String {
    if is_vacant(payload) {
        return String::new();
    }
    match payload {
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_json::to_string_pretty(other).unwrap_or_default(),
    }
}
