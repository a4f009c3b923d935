//! Tolerant field lookup over an untyped agent payload.
//!
//! Every extractor reads the payload through these helpers. A field that is
//! missing, `null`, or of the wrong shape is simply `None` (or empty), so no
//! caller has to type-check values on its own.

use serde_json::{Map, Value};

/// Key under which the backend nests the agent response one level deep.
pub const DATA_KEY: &str = "data";

/// Field of any shape, `None` when the value is not an object or lacks the key.
pub fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_object()?.get(key).filter(|v| !v.is_null())
}

/// Non-blank string field, trimmed.
pub fn text_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    non_blank(field(value, key)?)
}

pub fn object_field<'a>(value: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    field(value, key)?.as_object()
}

pub fn array_field<'a>(value: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    field(value, key)?.as_array()
}

/// First key in `keys` that resolves to a non-blank string.
pub fn first_text<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| text_field(value, key))
}

/// First key in `keys` that is present with a non-null value.
pub fn first_field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| field(value, key))
}

/// Trimmed string content of a value, `None` for blanks and non-strings.
pub fn non_blank(value: &Value) -> Option<&str> {
    let text = value.as_str()?.trim();
    if text.is_empty() { None } else { Some(text) }
}

/// Strings of an array (or a lone string), trimmed, blanks and non-strings dropped.
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(non_blank)
            .map(str::to_string)
            .collect(),
        Value::String(_) => non_blank(value).map(str::to_string).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// Objects the narrative fields may live in: the payload itself, then the
/// object nested under `data`.
pub fn scopes(payload: &Value) -> Vec<&Value> {
    let mut scopes = Vec::with_capacity(2);
    if payload.is_object() {
        scopes.push(payload);
    }
    if let Some(data) = field(payload, DATA_KEY).filter(|d| d.is_object()) {
        scopes.push(data);
    }
    scopes
}

/// `null`, `{}`, `[]` and blank strings carry nothing worth showing.
pub fn is_vacant(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn field_treats_null_and_non_objects_as_absent() {
        assert!(field(&json!({"a": null}), "a").is_none());
        assert!(field(&json!("text"), "a").is_none());
        assert!(field(&json!([1, 2]), "a").is_none());
        assert_eq!(field(&json!({"a": 1}), "a"), Some(&json!(1)));
    }

    #[test]
    fn text_field_skips_blanks_and_wrong_types() {
        let value = json!({"blank": "   ", "num": 5, "ok": "  hi  "});
        assert_eq!(text_field(&value, "blank"), None);
        assert_eq!(text_field(&value, "num"), None);
        assert_eq!(text_field(&value, "ok"), Some("hi"));
    }

    #[test]
    fn first_text_respects_key_priority() {
        let value = json!({"formatted": "second", "reasoning": "first"});
        assert_eq!(first_text(&value, &["reasoning", "formatted"]), Some("first"));
        assert_eq!(first_text(&value, &["missing", "formatted"]), Some("second"));
    }

    #[test]
    fn string_list_accepts_array_or_single_string() {
        assert_eq!(
            string_list(&json!(["a", 1, " ", null, " b "])),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(string_list(&json!("solo")), vec!["solo".to_string()]);
        assert!(string_list(&json!({"a": "b"})).is_empty());
    }

    #[test]
    fn scopes_include_nested_data_object_only() {
        let payload = json!({"data": {"text": "x"}});
        assert_eq!(scopes(&payload).len(), 2);

        let payload = json!({"data": [1, 2]});
        assert_eq!(scopes(&payload).len(), 1);

        assert!(scopes(&json!("plain")).is_empty());
    }

    #[test]
    fn vacant_values() {
        assert!(is_vacant(&json!(null)));
        assert!(is_vacant(&json!({})));
        assert!(is_vacant(&json!([])));
        assert!(is_vacant(&json!("  ")));
        assert!(!is_vacant(&json!(0)));
        assert!(!is_vacant(&json!({"a": 1})));
    }
}
