use crate::value_objects::label::SentimentLabel;
use serde::{Deserialize, Serialize};

/// Running tally of first-time classifications per label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    #[serde(rename = "positif", default)]
    pub positive: u64,
    #[serde(rename = "netral", default)]
    pub neutral: u64,
    #[serde(rename = "negatif", default)]
    pub negative: u64,
}

impl SentimentCounts {
    pub fn get(&self, label: SentimentLabel) -> u64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }

    pub fn increment(&mut self, label: SentimentLabel) {
        let slot = match label {
            SentimentLabel::Positive => &mut self.positive,
            SentimentLabel::Neutral => &mut self.neutral,
            SentimentLabel::Negative => &mut self.negative,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn total(&self) -> u64 {
        self.positive
            .saturating_add(self.neutral)
            .saturating_add(self.negative)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (SentimentLabel, u64)> + '_ {
        SentimentLabel::ALL
            .iter()
            .map(move |label| (*label, self.get(*label)))
    }
}

#[cfg(test)]
mod tests {
    use super::SentimentCounts;
    use crate::value_objects::label::SentimentLabel;

    #[test]
    fn increment_touches_only_one_label() {
        let mut counts = SentimentCounts::default();
        counts.increment(SentimentLabel::Neutral);
        counts.increment(SentimentLabel::Neutral);
        counts.increment(SentimentLabel::Negative);
        assert_eq!(counts.get(SentimentLabel::Positive), 0);
        assert_eq!(counts.get(SentimentLabel::Neutral), 2);
        assert_eq!(counts.get(SentimentLabel::Negative), 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn json_always_carries_all_three_keys() {
        let json = serde_json::to_value(SentimentCounts::default()).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"positif": 0, "netral": 0, "negatif": 0})
        );
    }

    #[test]
    fn json_missing_keys_default_to_zero() {
        let counts: SentimentCounts =
            serde_json::from_str(r#"{"positif": 4}"#).expect("partial object");
        assert_eq!(counts.positive, 4);
        assert_eq!(counts.neutral, 0);
        assert_eq!(counts.negative, 0);
    }

    #[test]
    fn iter_follows_display_order() {
        let counts = SentimentCounts {
            positive: 1,
            neutral: 2,
            negative: 3,
        };
        let seen: Vec<_> = counts.iter().collect();
        assert_eq!(
            seen,
            vec![
                (SentimentLabel::Positive, 1),
                (SentimentLabel::Neutral, 2),
                (SentimentLabel::Negative, 3),
            ]
        );
    }
}
