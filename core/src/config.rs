use serde::{Deserialize, Serialize};

pub const DEBUG_TABLE_KEYWORDS_VERSION: &str = "debug_table_keywords.v1";
pub const DEFAULT_DEBUG_TABLE_KEYWORDS: [&str; 2] = ["artifact", "history"];
pub const DEFAULT_CHART_PALETTE: [&str; 8] = [
    "#ef4444", "#f59e0b", "#10b981", "#3b82f6", "#8b5cf6", "#ec4899", "#14b8a6", "#eab308",
];

/// What to do when a risk label is mentioned more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateLabelPolicy {
    /// Keep the first mention's value; later mentions are dropped.
    #[default]
    KeepFirst,
    /// Keep the first mention's position but take the last mention's value.
    KeepLast,
}

impl DuplicateLabelPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "first" | "keep_first" => Some(Self::KeepFirst),
            "last" | "keep_last" => Some(Self::KeepLast),
            _ => None,
        }
    }
}

/// Versioned keyword set that marks a table as internal bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugTableKeywords {
    pub version: String,
    /// Lowercase substrings matched against the table title
    pub keywords: Vec<String>,
}

impl Default for DebugTableKeywords {
    fn default() -> Self {
        Self {
            version: DEBUG_TABLE_KEYWORDS_VERSION.to_string(),
            keywords: DEFAULT_DEBUG_TABLE_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl DebugTableKeywords {
    pub fn new(version: impl Into<String>, keywords: impl IntoIterator<Item = String>) -> Self {
        Self {
            version: version.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Case-insensitive substring match of `title` against the keyword set.
    pub fn matches(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.keywords.iter().any(|k| title.contains(k.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    pub debug_tables: DebugTableKeywords,
    /// Chart colors, assigned by position and cycled
    pub chart_palette: Vec<String>,
    pub duplicate_labels: DuplicateLabelPolicy,
    /// Keep the original payload on the message for debug display
    pub retain_raw: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            debug_tables: DebugTableKeywords::default(),
            chart_palette: DEFAULT_CHART_PALETTE.iter().map(|c| c.to_string()).collect(),
            duplicate_labels: DuplicateLabelPolicy::default(),
            retain_raw: true,
        }
    }
}

impl NormalizerConfig {
    pub fn with_debug_tables(mut self, debug_tables: DebugTableKeywords) -> Self {
        self.debug_tables = debug_tables;
        self
    }

    pub fn with_duplicate_labels(mut self, policy: DuplicateLabelPolicy) -> Self {
        self.duplicate_labels = policy;
        self
    }

    pub fn with_retain_raw(mut self, retain_raw: bool) -> Self {
        self.retain_raw = retain_raw;
        self
    }

    /// Color for the chart slice at `index`. Falls back to the default
    /// palette when the configured one is empty.
    pub fn color_at(&self, index: usize) -> String {
        if self.chart_palette.is_empty() {
            DEFAULT_CHART_PALETTE[index % DEFAULT_CHART_PALETTE.len()].to_string()
        } else {
            self.chart_palette[index % self.chart_palette.len()].clone()
        }
    }
}
