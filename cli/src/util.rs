use std::io::Read;
use std::time::Duration;

use serde::Serialize;
use serde_json::{Value, json};

/// Exit codes: 0=success (2xx), 1=client error (4xx), 2=server error (5xx),
///             3=connection error, 4=usage error
pub const EXIT_OK: i32 = 0;
pub const EXIT_CLIENT_ERROR: i32 = 1;
pub const EXIT_SERVER_ERROR: i32 = 2;
pub const EXIT_CONNECTION_ERROR: i32 = 3;
pub const EXIT_USAGE_ERROR: i32 = 4;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
// Agent turns call several upstream tools before answering.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

pub fn exit_code_for_status(status: u16) -> i32 {
    match status {
        200..=299 => EXIT_OK,
        400..=499 => EXIT_CLIENT_ERROR,
        _ => EXIT_SERVER_ERROR,
    }
}

/// Print a structured error to stderr.
pub fn print_error(kind: &str, message: &str, docs_hint: Option<&str>) {
    let mut err = json!({
        "error": kind,
        "message": message
    });
    if let Some(hint) = docs_hint {
        err["docs_hint"] = json!(hint);
    }
    eprintln!(
        "{}",
        serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string())
    );
}

pub fn exit_error(message: &str, docs_hint: Option<&str>) -> ! {
    print_error("cli_error", message, docs_hint);
    std::process::exit(EXIT_USAGE_ERROR);
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let formatted =
        serde_json::to_string_pretty(value).map_err(|e| format!("Failed to encode output: {e}"))?;
    println!("{formatted}");
    Ok(())
}

/// Read JSON from a file path or stdin (when path is "-").
pub fn read_json_from_file(path: &str) -> Result<Value, String> {
    let raw = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {e}"))?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read file '{path}': {e}"))?
    };
    parse_json(&raw).map_err(|e| format!("Invalid JSON in '{path}': {e}"))
}

pub fn parse_json(raw: &str) -> Result<Value, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(raw)
}

/// Response body as JSON. Non-JSON bodies come back as a plain string so the
/// normalizer can still show them as text.
pub async fn response_body(resp: reqwest::Response) -> Result<Value, String> {
    let text = resp
        .text()
        .await
        .map_err(|e| format!("Failed to read response body: {e}"))?;
    Ok(parse_json(&text).unwrap_or(Value::String(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_exit_code() {
        assert_eq!(exit_code_for_status(200), EXIT_OK);
        assert_eq!(exit_code_for_status(204), EXIT_OK);
        assert_eq!(exit_code_for_status(404), EXIT_CLIENT_ERROR);
        assert_eq!(exit_code_for_status(502), EXIT_SERVER_ERROR);
    }

    #[test]
    fn blank_input_parses_as_null() {
        assert_eq!(parse_json("  \n").unwrap(), Value::Null);
        assert_eq!(parse_json(r#"{"ok": true}"#).unwrap(), json!({"ok": true}));
        assert!(parse_json("{oops").is_err());
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = read_json_from_file("/nonexistent/riskchat/payload.json").unwrap_err();
        assert!(err.contains("/nonexistent/riskchat/payload.json"));
    }
}
