use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three fixed sentiment categories.
///
/// Wire names follow the labels the model was trained with (`positif`,
/// `netral`, `negatif`); parsing also accepts the English names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "positif", alias = "positive")]
    Positive,
    #[serde(rename = "netral", alias = "neutral")]
    Neutral,
    #[serde(rename = "negatif", alias = "negative")]
    Negative,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positif",
            SentimentLabel::Neutral => "netral",
            SentimentLabel::Negative => "negatif",
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_lowercase().as_str() {
            "positif" | "positive" => Ok(SentimentLabel::Positive),
            "netral" | "neutral" => Ok(SentimentLabel::Neutral),
            "negatif" | "negative" => Ok(SentimentLabel::Negative),
            _ => Err(format!("unsupported sentiment label: {value}")),
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
