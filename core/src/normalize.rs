use serde_json::Value;

use crate::config::NormalizerConfig;
use crate::message::StructuredMessage;
use crate::{badges, files, missing, risk, tables, text};

/// Turns one agent payload into one [`StructuredMessage`].
///
/// Stateless: the same payload always yields the same message, and a single
/// instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn normalize(&self, payload: &Value) -> StructuredMessage {
        let extracted = text::extract(payload);
        let risk_chart = risk::extract(&extracted.sources, &self.config);
        let files = files::extract(&extracted.sources);
        let tables = tables::extract(payload, &self.config);
        let missing_data = missing::extract(payload);
        let risk_badges = badges::classify(payload, &extracted.sources);

        let show_pie_chart = risk_chart.as_ref().is_some_and(|c| !c.is_empty());
        let show_table = tables.iter().any(|t| !t.debug);

        tracing::debug!(
            text_len = extracted.display.len(),
            sources = extracted.sources.len(),
            badges = risk_badges.len(),
            chart = show_pie_chart,
            tables = tables.len(),
            files = files.len(),
            missing = missing_data.len(),
            "normalized agent payload"
        );

        StructuredMessage {
            display_text: extracted.display,
            risk_badges,
            risk_chart,
            tables,
            files,
            missing_data,
            show_pie_chart,
            show_table,
            raw: (self.config.retain_raw && !payload.is_null()).then(|| payload.clone()),
        }
    }
}

/// Normalize with the default configuration.
pub fn normalize(payload: &Value) -> StructuredMessage {
    Normalizer::default().normalize(payload)
}
