use thiserror::Error;

/// Fallback message when a rejected response carries no detail.
pub const UNKNOWN_AGENT_ERROR: &str = "Неизвестная ошибка";

/// Request-level failures reported by the agent endpoint itself. Payload
/// content never produces an error; only the response envelope can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// The response carried `ok: false`.
    #[error("{detail}")]
    Rejected { detail: String },
}

impl AgentError {
    pub fn rejected(detail: Option<&str>) -> Self {
        AgentError::Rejected {
            detail: detail.unwrap_or(UNKNOWN_AGENT_ERROR).to_string(),
        }
    }
}
