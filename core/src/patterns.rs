//! Text-scanning patterns shared by the extractors.
//!
//! Every heuristic used to read agent prose lives here so it can be tested on
//! its own, independent of the extractor that applies it.
//!
//! Keyword hits are plain pattern matches. Negation is recognized only in the
//! simple forms covered by [`is_negated`] (`нет блокировок`, `банкротства не
//! выявлено`); anything subtler, such as double negation or negation carried
//! across clauses, is read as a positive hit.

use std::sync::LazyLock;

use regex::Regex;

use crate::message::RiskLevel;

pub const PATTERN_SET_VERSION: &str = "risk_text_patterns.v2";

/// `<label> <integer>%`, e.g. `ФНС 40%` or `Риск банкротства: 15 %`.
/// The label is one to four letter-initial words right before the number;
/// leading [`LABEL_CONNECTORS`] are stripped by [`risk_shares`].
pub static RISK_SHARE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<label>\p{L}[\p{L}.\-]*(?:[ \t]+\p{L}[\p{L}.\-]*){0,3})[ \t]*[:\-–—]?[ \t]*(?P<value>[0-9]{1,3})[ \t]*%",
    )
    .expect("valid risk share regex")
});

/// Absolute http(s) URL; trailing sentence punctuation is trimmed separately.
pub static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s<>"'`)\]}\\]+"#).expect("valid url regex")
});

/// Markdown link `[label](https://…)`.
pub static MARKDOWN_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?P<label>[^\]\n]+)\]\((?P<url>https?://[^\s)]+)\)")
        .expect("valid markdown link regex")
});

pub static BANKRUPTCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:банкрот\w*|несостоятельн\w*|bankrupt\w*|insolven\w*)")
        .expect("valid bankruptcy regex")
});
pub static LIQUIDATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:ликвидац\w*|ликвидир\w*|liquidat\w*)").expect("valid liquidation regex")
});
pub static ACCOUNT_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:блокиров\w*|заблокирован\w*|приостановлени\w*\s+операций|blocked\s+accounts?|account\s+blocks?)",
    )
    .expect("valid account block regex")
});
pub static LITIGATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:арбитраж\w*|судебн\w*|иск(?:и|ов|а|ом|ам)?\b|litigation|lawsuits?|court\s+cases?)",
    )
    .expect("valid litigation regex")
});
pub static DEBT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:задолженност\w*|недоимк\w*|долг(?:и|ов|а|ами|ам|ом)?\b|debts?\b|arrears)",
    )
    .expect("valid debt regex")
});
pub static MASS_REGISTRATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:массов\w*|mass\s+(?:registration|address|director)\w*)")
        .expect("valid mass registration regex")
});
pub static DISQUALIFICATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:дисквалифи\w*|disqualif\w*)").expect("valid disqualification regex")
});
pub static HIGH_RISK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:высок\w*\s+риск\w*|риск\w*\s*[:\-–—]?\s*высок\w*|high[\s-]+risk)")
        .expect("valid high risk regex")
});
pub static MEDIUM_RISK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:средн|умеренн)\w*\s+риск\w*|риск\w*\s*[:\-–—]?\s*(?:средн|умеренн)\w*|(?:medium|moderate)[\s-]+risk)",
    )
    .expect("valid medium risk regex")
});
pub static LOW_RISK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:низк\w*\s+риск\w*|риск\w*\s*[:\-–—]?\s*низк\w*|low[\s-]+risk)")
        .expect("valid low risk regex")
});

/// Negation right after a hit, within the same clause.
pub static NEGATION_AFTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[^.!?;,\n]*?(?:\bне\s+(?:выявлен|обнаружен|установлен|найден|зафиксирован)\w*|\bотсутству\w*|\bнет\b|\bnot\s+found\b|\bnone\b)",
    )
    .expect("valid trailing negation regex")
});

/// Negation right before a hit: `нет`, `без`, `отсутствие` and at most one
/// word in between.
pub static NEGATION_BEFORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^\p{L}])(?:нет|без|отсутствие|no|without)\s+(?:\p{L}+\s+)?$")
        .expect("valid leading negation regex")
});

/// Words that join a risk share to the previous one and are not part of its
/// label, as in `ФНС 40% и Арбитраж 60%`.
pub const LABEL_CONNECTORS: [&str; 12] = [
    "и", "а", "в", "во", "на", "по", "также", "плюс", "из", "and", "in", "plus",
];

pub const HIGH_LEVEL_WORDS: [&str; 5] = ["high", "высокий", "высокая", "высокое", "critical"];
pub const MEDIUM_LEVEL_WORDS: [&str; 7] = [
    "medium",
    "moderate",
    "средний",
    "средняя",
    "среднее",
    "умеренный",
    "умеренная",
];
pub const LOW_LEVEL_WORDS: [&str; 4] = ["low", "низкий", "низкая", "низкое"];

/// One `<label> <value>%` mention found in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskShare {
    pub label: String,
    pub value: u32,
    pub start: usize,
}

/// All percentage mentions in `text`, left to right. Values above 100 are
/// not percentages of a whole and are skipped.
pub fn risk_shares(text: &str) -> Vec<RiskShare> {
    RISK_SHARE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            let label = strip_connectors(
                caps.name("label")?
                    .as_str()
                    .trim()
                    .trim_end_matches(['.', '-'])
                    .trim(),
            );
            let value = caps.name("value")?.as_str().parse::<u32>().ok()?;
            if label.is_empty() || value > 100 {
                tracing::trace!(label, value, "skipping risk share mention");
                return None;
            }
            Some(RiskShare {
                label: label.to_string(),
                value,
                start: full.start(),
            })
        })
        .collect()
}

fn strip_connectors(label: &str) -> &str {
    let mut rest = label;
    while let Some((first, tail)) = rest.split_once([' ', '\t']) {
        if !LABEL_CONNECTORS.contains(&first.to_lowercase().as_str()) {
            break;
        }
        rest = tail.trim_start();
    }
    if LABEL_CONNECTORS.contains(&rest.to_lowercase().as_str()) {
        return "";
    }
    rest
}

/// A URL occurrence with its byte span in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch<'a> {
    pub url: &'a str,
    pub start: usize,
    pub end: usize,
}

pub fn urls(text: &str) -> Vec<UrlMatch<'_>> {
    URL_RE
        .find_iter(text)
        .filter_map(|m| {
            let url = m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?']);
            Some(UrlMatch {
                url,
                start: m.start(),
                end: m.start() + url.len(),
            })
        })
        .collect()
}

/// Label of a Markdown link whose URL starts at `url_start`.
pub fn markdown_label_at(text: &str, url_start: usize) -> Option<&str> {
    MARKDOWN_LINK_RE.captures_iter(text).find_map(|caps| {
        let url = caps.name("url")?;
        if url.start() != url_start {
            return None;
        }
        let label = caps.name("label")?.as_str().trim();
        if label.is_empty() { None } else { Some(label) }
    })
}

const LABEL_SEPARATORS: [char; 4] = [':', '-', '–', '—'];
const PHRASE_BOUNDARIES: [char; 6] = ['.', '!', '?', ';', ',', '\n'];
const MAX_LABEL_CHARS: usize = 80;

/// Phrase such as `Скачайте выписку:` immediately before `url_start` on the
/// same line.
pub fn label_phrase_before(text: &str, url_start: usize) -> Option<&str> {
    let prefix = text.get(..url_start)?;
    let line = prefix.rsplit('\n').next().unwrap_or(prefix).trim_end();
    let phrase = line.strip_suffix(LABEL_SEPARATORS)?.trim_end();
    let phrase = phrase
        .rsplit(PHRASE_BOUNDARIES)
        .next()
        .unwrap_or(phrase)
        .trim()
        .trim_start_matches(['*', '_', '#', '>', '•'])
        .trim();
    if phrase.is_empty()
        || phrase.chars().count() > MAX_LABEL_CHARS
        || !phrase.chars().any(char::is_alphabetic)
    {
        return None;
    }
    Some(phrase)
}

/// Whether the match at `start..end` in `text` is negated within its clause.
pub fn is_negated(text: &str, start: usize, end: usize) -> bool {
    let before = text.get(..start).unwrap_or_default();
    let after = text.get(end..).unwrap_or_default();
    NEGATION_BEFORE_RE.is_match(before) || NEGATION_AFTER_RE.is_match(after)
}

/// Map an explicit level marker (`high`, `высокий`, …) to a risk level.
pub fn level_from_word(raw: &str) -> Option<RiskLevel> {
    let normalized = raw.trim().to_lowercase();
    let first_word = normalized.split_whitespace().next()?;
    if HIGH_LEVEL_WORDS.contains(&first_word) {
        Some(RiskLevel::High)
    } else if MEDIUM_LEVEL_WORDS.contains(&first_word) {
        Some(RiskLevel::Medium)
    } else if LOW_LEVEL_WORDS.contains(&first_word) {
        Some(RiskLevel::Low)
    } else {
        None
    }
}
