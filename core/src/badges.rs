use regex::Regex;
use serde_json::Value;

use crate::accessor::{first_text, scopes};
use crate::message::{Badge, RiskLevel};
use crate::patterns::{
    ACCOUNT_BLOCK_RE, BANKRUPTCY_RE, DEBT_RE, DISQUALIFICATION_RE, HIGH_RISK_RE, LIQUIDATION_RE,
    LITIGATION_RE, LOW_RISK_RE, MASS_REGISTRATION_RE, MEDIUM_RISK_RE, is_negated, level_from_word,
};

pub const RISK_LEVEL_KEYS: [&str; 3] = ["risk_level", "riskLevel", "risk"];

struct BadgeRule {
    label: &'static str,
    emoji: &'static str,
    level: RiskLevel,
    pattern: &'static Regex,
}

fn keyword_rules() -> [BadgeRule; 10] {
    [
        BadgeRule {
            label: "Банкротство",
            emoji: "💀",
            level: RiskLevel::High,
            pattern: &BANKRUPTCY_RE,
        },
        BadgeRule {
            label: "Ликвидация",
            emoji: "⛔",
            level: RiskLevel::High,
            pattern: &LIQUIDATION_RE,
        },
        BadgeRule {
            label: "Блокировка счетов",
            emoji: "🔒",
            level: RiskLevel::High,
            pattern: &ACCOUNT_BLOCK_RE,
        },
        BadgeRule {
            label: "Судебные споры",
            emoji: "⚖️",
            level: RiskLevel::Medium,
            pattern: &LITIGATION_RE,
        },
        BadgeRule {
            label: "Задолженность",
            emoji: "💸",
            level: RiskLevel::Medium,
            pattern: &DEBT_RE,
        },
        BadgeRule {
            label: "Признаки массовости",
            emoji: "🏢",
            level: RiskLevel::Medium,
            pattern: &MASS_REGISTRATION_RE,
        },
        BadgeRule {
            label: "Дисквалификация",
            emoji: "🚫",
            level: RiskLevel::Medium,
            pattern: &DISQUALIFICATION_RE,
        },
        level_rule(RiskLevel::High, &HIGH_RISK_RE),
        level_rule(RiskLevel::Medium, &MEDIUM_RISK_RE),
        level_rule(RiskLevel::Low, &LOW_RISK_RE),
    ]
}

fn level_rule(level: RiskLevel, pattern: &'static Regex) -> BadgeRule {
    let (label, emoji) = level_label(level);
    BadgeRule {
        label,
        emoji,
        level,
        pattern,
    }
}

fn level_label(level: RiskLevel) -> (&'static str, &'static str) {
    match level {
        RiskLevel::High => ("Высокий риск", "🔴"),
        RiskLevel::Medium => ("Средний риск", "🟠"),
        RiskLevel::Low => ("Низкий риск", "🟢"),
    }
}

pub fn color_class(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "bg-red-600/80 text-white",
        RiskLevel::Medium => "bg-amber-500/80 text-neutral-900",
        RiskLevel::Low => "bg-emerald-600/80 text-white",
    }
}

fn badge(label: &str, emoji: &str, level: RiskLevel) -> Badge {
    Badge {
        label: label.to_string(),
        emoji: Some(emoji.to_string()),
        level,
        color_class: color_class(level).to_string(),
    }
}

/// Badges in detection order: an explicit risk-level field first, then
/// keyword hits ordered by where they first occur in the sources. Each label
/// appears once; unrecognized signals yield nothing.
pub fn classify(payload: &Value, sources: &[String]) -> Vec<Badge> {
    let mut badges: Vec<Badge> = Vec::new();
    let mut push = |candidate: Badge| {
        if !badges.iter().any(|b| b.label == candidate.label) {
            badges.push(candidate);
        }
    };

    let explicit = scopes(payload)
        .into_iter()
        .find_map(|scope| first_text(scope, &RISK_LEVEL_KEYS))
        .and_then(level_from_word);
    if let Some(level) = explicit {
        let (label, emoji) = level_label(level);
        push(badge(label, emoji, level));
    }

    let rules = keyword_rules();
    let mut hits: Vec<(usize, usize, &BadgeRule)> = Vec::new();
    for (source_index, source) in sources.iter().enumerate() {
        for rule in &rules {
            let found = rule
                .pattern
                .find_iter(source)
                .find(|m| !is_negated(source, m.start(), m.end()));
            if let Some(found) = found {
                hits.push((source_index, found.start(), rule));
            }
        }
    }
    hits.sort_by_key(|(source_index, start, _)| (*source_index, *start));
    for (_, _, rule) in hits {
        push(badge(rule.label, rule.emoji, rule.level));
    }

    badges
}
