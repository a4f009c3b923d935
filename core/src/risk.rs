use crate::config::{DuplicateLabelPolicy, NormalizerConfig};
use crate::message::ChartData;
use crate::patterns::risk_shares;

/// Risk distribution from `<label> <value>%` mentions across `sources`.
/// `None` when nothing was mentioned.
pub fn extract(sources: &[String], config: &NormalizerConfig) -> Option<ChartData> {
    let mut entries: Vec<(String, u32)> = Vec::new();
    for share in sources.iter().flat_map(|source| risk_shares(source)) {
        match entries.iter_mut().find(|(label, _)| *label == share.label) {
            Some(existing) => {
                if config.duplicate_labels == DuplicateLabelPolicy::KeepLast {
                    existing.1 = share.value;
                }
            }
            None => entries.push((share.label, share.value)),
        }
    }

    if entries.is_empty() {
        return None;
    }

    let colors = (0..entries.len()).map(|i| config.color_at(i)).collect();
    let (labels, values): (Vec<String>, Vec<u32>) = entries.into_iter().unzip();
    Some(ChartData {
        labels,
        values,
        colors,
    })
}
