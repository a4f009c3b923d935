use riskchat_core::Normalizer;
use serde_json::{Value, json};

use crate::chat::ChatEntry;
use crate::util::{
    EXIT_CONNECTION_ERROR, EXIT_OK, EXIT_USAGE_ERROR, client, exit_code_for_status, print_error,
    print_json, response_body,
};

/// Prefix for answers to the agent's missing-data prompts.
pub const SUPPLEMENT_PREFIX: &str = "Дополнительные данные: ";

/// Send one message to the agent and print `{"entries": [user, agent]}`.
///
/// Failed requests still print both entries, with the error on the agent
/// entry, and exit with the status-derived code.
pub async fn run(
    normalizer: &Normalizer,
    api_url: &str,
    token: Option<&str>,
    message: &str,
    supplement: bool,
) -> i32 {
    let Some(message) = compose_message(message, supplement) else {
        print_error("usage_error", "Message must not be empty", None);
        return EXIT_USAGE_ERROR;
    };

    let user = ChatEntry::user(&message);
    let (agent, exit_code) = send(normalizer, api_url, token, &message).await;

    match print_json(&json!({ "entries": [user, agent] })) {
        Ok(()) => exit_code,
        Err(e) => {
            print_error("cli_error", &e, None);
            EXIT_USAGE_ERROR
        }
    }
}

async fn send(
    normalizer: &Normalizer,
    api_url: &str,
    token: Option<&str>,
    message: &str,
) -> (ChatEntry, i32) {
    let mut req = client().post(api_url).json(&json!({ "message": message }));
    if let Some(t) = token {
        req = req.header("Authorization", format!("Bearer {t}"));
    }

    tracing::info!(api_url, "sending message to agent");
    let resp = match req.send().await {
        Ok(r) => r,
        Err(e) => {
            let status = e.status().map(|s| s.as_u16());
            let text = request_error_message(status, &e.to_string());
            print_error(
                "connection_error",
                &text,
                Some("Is the agent API running? Check RISKCHAT_API_URL."),
            );
            return (ChatEntry::agent_error(text), EXIT_CONNECTION_ERROR);
        }
    };

    let status = resp.status().as_u16();
    let body = match response_body(resp).await {
        Ok(b) => b,
        Err(e) => {
            let text = request_error_message(Some(status), &e);
            print_error("connection_error", &text, None);
            return (ChatEntry::agent_error(text), EXIT_CONNECTION_ERROR);
        }
    };

    let exit_code = exit_code_for_status(status);
    if exit_code == EXIT_OK {
        tracing::info!(status, "agent replied");
        return (ChatEntry::agent(normalizer, &body), EXIT_OK);
    }

    let detail = error_detail(&body);
    let text = if status >= 500 {
        server_error_message(status, &detail)
    } else {
        request_error_message(Some(status), &detail)
    };
    tracing::warn!(status, "agent request failed");
    print_error(
        if status >= 500 { "server_error" } else { "client_error" },
        &text,
        None,
    );
    (ChatEntry::agent_error(text), exit_code)
}

/// Outgoing message text, or `None` when there is nothing to send.
/// Supplements answer a missing-data prompt and carry [`SUPPLEMENT_PREFIX`].
pub fn compose_message(raw: &str, supplement: bool) -> Option<String> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    Some(if supplement {
        format!("{SUPPLEMENT_PREFIX}{text}")
    } else {
        text.to_string()
    })
}

/// Best human-readable detail from an error response body.
fn error_detail(body: &Value) -> String {
    ["detail", "error", "message"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
        .or_else(|| body.as_str().map(str::to_string))
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| body.to_string())
}

pub fn server_error_message(status: u16, detail: &str) -> String {
    format!("Ошибка сервера ({status}). Повторите запрос позже. Детали: {detail}")
}

pub fn request_error_message(status: Option<u16>, detail: &str) -> String {
    let detail = if detail.trim().is_empty() { "неизвестно" } else { detail };
    match status {
        Some(status) => format!("Ошибка запроса ({status}): {detail}"),
        None => format!("Ошибка запроса: {detail}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplements_are_prefixed() {
        assert_eq!(
            compose_message("  ИНН 7707083893 ", true).as_deref(),
            Some("Дополнительные данные: ИНН 7707083893")
        );
        assert_eq!(compose_message("проверь ООО", false).as_deref(), Some("проверь ООО"));
        assert_eq!(compose_message("   ", true), None);
    }

    #[test]
    fn server_errors_ask_to_retry_later() {
        assert_eq!(
            server_error_message(502, "Bad Gateway"),
            "Ошибка сервера (502). Повторите запрос позже. Детали: Bad Gateway"
        );
    }

    #[test]
    fn request_errors_include_status_when_known() {
        assert_eq!(
            request_error_message(Some(401), "Unauthorized"),
            "Ошибка запроса (401): Unauthorized"
        );
        assert_eq!(request_error_message(None, ""), "Ошибка запроса: неизвестно");
    }

    #[test]
    fn error_detail_prefers_named_fields() {
        assert_eq!(error_detail(&json!({"detail": "нет доступа", "error": "x"})), "нет доступа");
        assert_eq!(error_detail(&json!({"error": "forbidden"})), "forbidden");
        assert_eq!(error_detail(&json!("plain text body")), "plain text body");
        assert_eq!(error_detail(&json!({"code": 7})), r#"{"code":7}"#);
    }
}
