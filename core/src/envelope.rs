//! Top-level response fields the calling side inspects before normalizing.
//!
//! The agent endpoint answers `{ "ok": bool, "detail"?: str, "error"?: str,
//! … }`. `ok: false` means the request itself failed and there is nothing to
//! normalize; anything else (including a missing flag) is a payload.

use serde_json::Value;

use crate::accessor::{field, text_field};
use crate::error::AgentError;

#[derive(Debug, Clone, Copy)]
pub struct AgentEnvelope<'a> {
    pub ok: Option<bool>,
    pub detail: Option<&'a str>,
    pub error: Option<&'a str>,
    body: &'a Value,
}

impl<'a> AgentEnvelope<'a> {
    pub fn parse(body: &'a Value) -> Self {
        Self {
            ok: field(body, "ok").and_then(Value::as_bool),
            detail: text_field(body, "detail"),
            error: text_field(body, "error"),
            body,
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.ok == Some(false)
    }

    /// The payload to normalize, or the rejection that short-circuits it.
    pub fn into_payload(self) -> Result<&'a Value, AgentError> {
        if self.is_rejected() {
            return Err(AgentError::rejected(self.detail.or(self.error)));
        }
        Ok(self.body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::UNKNOWN_AGENT_ERROR;

    #[test]
    fn ok_response_passes_whole_body() {
        let body = json!({"ok": true, "text": "t", "data": {"result": {}}});
        let payload = AgentEnvelope::parse(&body).into_payload().unwrap();
        assert_eq!(payload, &body);
    }

    #[test]
    fn missing_flag_is_not_a_rejection() {
        let body = json!({"reasoning": "r"});
        assert!(!AgentEnvelope::parse(&body).is_rejected());
    }

    #[test]
    fn rejection_prefers_detail_then_error() {
        let body = json!({"ok": false, "detail": "таймаут агента", "error": "e"});
        let err = AgentEnvelope::parse(&body).into_payload().unwrap_err();
        assert_eq!(err.to_string(), "таймаут агента");

        let body = json!({"ok": false, "error": "нет токена"});
        let err = AgentEnvelope::parse(&body).into_payload().unwrap_err();
        assert_eq!(err.to_string(), "нет токена");

        let body = json!({"ok": false});
        let err = AgentEnvelope::parse(&body).into_payload().unwrap_err();
        assert_eq!(err.to_string(), UNKNOWN_AGENT_ERROR);
    }

    #[test]
    fn non_boolean_flag_is_ignored() {
        let body = json!({"ok": "false"});
        assert_eq!(AgentEnvelope::parse(&body).ok, None);
    }
}
