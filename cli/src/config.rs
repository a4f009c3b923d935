use riskchat_core::{DebugTableKeywords, DuplicateLabelPolicy, NormalizerConfig};

pub const DEBUG_TABLE_KEYWORDS_ENV: &str = "RISKCHAT_DEBUG_TABLE_KEYWORDS";
pub const DUPLICATE_LABELS_ENV: &str = "RISKCHAT_RISK_DUPLICATE_LABELS";
pub const CHART_PALETTE_ENV: &str = "RISKCHAT_CHART_PALETTE";
pub const RETAIN_RAW_ENV: &str = "RISKCHAT_RETAIN_RAW";

/// Version tag for keyword sets supplied through the environment.
pub const ENV_KEYWORDS_VERSION: &str = "debug_table_keywords.env";

pub fn normalizer_config() -> Result<NormalizerConfig, String> {
    normalizer_config_from(|key| std::env::var(key).ok())
}

/// Default configuration with overrides from `lookup`. Unset or blank
/// variables keep the default.
pub fn normalizer_config_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<NormalizerConfig, String> {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut config = NormalizerConfig::default();

    if let Some(raw) = get(DEBUG_TABLE_KEYWORDS_ENV) {
        let keywords = parse_list(&raw);
        if keywords.is_empty() {
            return Err(format!("{DEBUG_TABLE_KEYWORDS_ENV} has no keywords"));
        }
        config = config.with_debug_tables(DebugTableKeywords::new(ENV_KEYWORDS_VERSION, keywords));
    }

    if let Some(raw) = get(DUPLICATE_LABELS_ENV) {
        let policy = DuplicateLabelPolicy::parse(&raw).ok_or_else(|| {
            format!("{DUPLICATE_LABELS_ENV} must be 'first' or 'last', got '{raw}'")
        })?;
        config = config.with_duplicate_labels(policy);
    }

    if let Some(raw) = get(CHART_PALETTE_ENV) {
        config.chart_palette = parse_list(&raw);
    }

    if let Some(raw) = get(RETAIN_RAW_ENV) {
        config = config.with_retain_raw(parse_flag(&raw).ok_or_else(|| {
            format!("{RETAIN_RAW_ENV} must be a boolean, got '{raw}'")
        })?);
    }

    tracing::debug!(
        debug_tables = %config.debug_tables.version,
        duplicate_labels = ?config.duplicate_labels,
        retain_raw = config.retain_raw,
        "normalizer config loaded"
    );
    Ok(config)
}

/// Comma-separated list, trimmed, blanks dropped.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
