use serde_json::Value;

use crate::accessor::{first_field, scopes, string_list};
use crate::text::NARRATIVE_KEYS;

pub const MISSING_DATA_KEYS: [&str; 2] = ["missing_data", "missingData"];

/// Clarification requests the agent listed explicitly. Looks at the payload,
/// the `data` object, then a structured narrative object. No free-text
/// inference: without the field the result is empty.
pub fn extract(payload: &Value) -> Vec<String> {
    let explicit = scopes(payload).into_iter().find_map(|scope| {
        first_field(scope, &MISSING_DATA_KEYS).or_else(|| {
            first_field(scope, &NARRATIVE_KEYS)
                .filter(|n| n.is_object())
                .and_then(|n| first_field(n, &MISSING_DATA_KEYS))
        })
    });

    let mut items: Vec<String> = Vec::new();
    for item in explicit.map(string_list).unwrap_or_default() {
        if !items.contains(&item) {
            items.push(item);
        }
    }
    items
}
