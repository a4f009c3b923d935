use chrono::{DateTime, Utc};
use riskchat_core::{AgentEnvelope, Normalizer, StructuredMessage};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Agent,
}

/// One turn of the conversation as printed by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    pub id: Uuid,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
    pub parsed: StructuredMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatEntry {
    fn new(role: Role, parsed: StructuredMessage, error: Option<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role,
            timestamp: Utc::now(),
            parsed,
            error,
        }
    }

    pub fn user(message: &str) -> Self {
        Self::new(Role::User, StructuredMessage::from_text(message), None)
    }

    /// Agent turn for a response body. A rejected envelope yields an empty
    /// message carrying the error instead of a normalized payload.
    pub fn agent(normalizer: &Normalizer, body: &Value) -> Self {
        match AgentEnvelope::parse(body).into_payload() {
            Ok(payload) => Self::new(Role::Agent, normalizer.normalize(payload), None),
            Err(e) => {
                tracing::warn!(error = %e, "agent rejected the request");
                Self::new(Role::Agent, StructuredMessage::default(), Some(e.to_string()))
            }
        }
    }

    /// Agent turn for a bare payload, skipping the envelope check.
    pub fn agent_payload(normalizer: &Normalizer, payload: &Value) -> Self {
        Self::new(Role::Agent, normalizer.normalize(payload), None)
    }

    /// Agent turn for a failed request.
    pub fn agent_error(message: impl Into<String>) -> Self {
        Self::new(Role::Agent, StructuredMessage::default(), Some(message.into()))
    }
}
