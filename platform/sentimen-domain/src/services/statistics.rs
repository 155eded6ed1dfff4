use crate::entities::sentiment_counts::SentimentCounts;
use crate::value_objects::label::SentimentLabel;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelShare {
    pub label: SentimentLabel,
    pub count: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StatsView {
    NoData,
    Distribution { total: u64, shares: Vec<LabelShare> },
}

pub fn summarize(counts: &SentimentCounts) -> StatsView {
    let total = counts.total();
    if total == 0 {
        return StatsView::NoData;
    }

    let shares = counts
        .iter()
        .map(|(label, count)| LabelShare {
            label,
            count,
            percent: count as f64 * 100.0 / total as f64,
        })
        .collect();
    StatsView::Distribution { total, shares }
}
