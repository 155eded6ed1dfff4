use crate::entities::sentiment_counts::SentimentCounts;

/// Persisted per-label tally.
///
/// `load` never fails on a missing or unreadable-as-counts backing store; it
/// falls back to all-zero counts. `save` replaces the whole store.
pub trait LabelStore {
    fn load(&self) -> Result<SentimentCounts, String>;
    fn save(&self, counts: &SentimentCounts) -> Result<(), String>;
}
