use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized, renderable result of processing one agent payload.
/// Always fully populated; absent data is an empty collection or `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredMessage {
    /// Human-readable narrative (Markdown). Empty when nothing was found.
    pub display_text: String,
    /// Risk badges in detection order
    pub risk_badges: Vec<Badge>,
    /// Risk distribution; present only when at least one percentage was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_chart: Option<ChartData>,
    pub tables: Vec<Table>,
    /// File references, unique by URL, in order of first appearance
    pub files: Vec<FileRef>,
    /// Clarification requests from the agent
    pub missing_data: Vec<String>,
    pub show_pie_chart: bool,
    pub show_table: bool,
    /// Original payload, for diagnostic display only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

impl StructuredMessage {
    /// Message carrying only plain text, e.g. the user's own turn.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            display_text: text.into(),
            ..Self::default()
        }
    }

    /// Tables shown by default.
    pub fn user_tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter().filter(|t| !t.debug)
    }

    /// Tables tagged as internal bookkeeping.
    pub fn debug_tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter().filter(|t| t.debug)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    pub level: RiskLevel,
    /// Presentation style hint (CSS utility classes)
    pub color_class: String,
}

/// Parallel sequences for a pie chart. `values` are raw percentages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<u32>,
    pub colors: Vec<String>,
}

impl ChartData {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Union of row keys, first-seen order
    pub columns: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
    /// Internal bookkeeping data, hidden by default
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

impl FileRef {
    pub fn is_pdf(&self) -> bool {
        self.mime.as_deref() == Some("application/pdf")
            || self.url.to_lowercase().ends_with(".pdf")
    }
}
