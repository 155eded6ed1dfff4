use crate::entities::processed_dataset::{ProcessedDataset, ProcessedEntry};
use crate::entities::sentiment_counts::SentimentCounts;
use crate::repositories::classifier::Classifier;
use crate::value_objects::label::SentimentLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSource {
    /// Label came from the result cache (including an earlier row of the same batch).
    Cached,
    /// Text was classified for the first time in this batch.
    Fresh,
    /// Text was empty or whitespace only; nothing was classified.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedRow {
    pub label: Option<SentimentLabel>,
    pub source: RowSource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchClassification {
    pub rows: Vec<ClassifiedRow>,
    pub fresh: Vec<ProcessedEntry>,
    pub cache_hits: usize,
    pub skipped_rows: Vec<usize>,
}

impl BatchClassification {
    pub fn labels(&self) -> Vec<Option<SentimentLabel>> {
        self.rows.iter().map(|row| row.label).collect()
    }

    /// True when the batch added entries and the stores need persisting.
    pub fn is_dirty(&self) -> bool {
        !self.fresh.is_empty()
    }
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Labels every text, classifying only those absent from `dataset`.
///
/// The index is updated as rows are processed, so a text repeated within the
/// batch is classified and counted once; later repeats are cache hits.
/// Blank texts are skipped and leave both `counts` and `dataset` untouched.
pub fn classify_batch<S: AsRef<str>>(
    counts: &mut SentimentCounts,
    dataset: &mut ProcessedDataset,
    texts: &[S],
    classifier: &dyn Classifier,
) -> BatchClassification {
    let mut out = BatchClassification {
        rows: Vec::with_capacity(texts.len()),
        ..BatchClassification::default()
    };

    for (idx, text) in texts.iter().enumerate() {
        let text = text.as_ref();
        if is_blank(text) {
            out.skipped_rows.push(idx);
            out.rows.push(ClassifiedRow {
                label: None,
                source: RowSource::Skipped,
            });
            continue;
        }

        if let Some(label) = dataset.lookup(text) {
            out.cache_hits += 1;
            out.rows.push(ClassifiedRow {
                label: Some(label),
                source: RowSource::Cached,
            });
            continue;
        }

        let label = classifier.classify(text);
        dataset.insert(text, label);
        counts.increment(label);
        out.fresh.push(ProcessedEntry::new(text, label));
        out.rows.push(ClassifiedRow {
            label: Some(label),
            source: RowSource::Fresh,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{classify_batch, RowSource};
    use crate::entities::processed_dataset::ProcessedDataset;
    use crate::entities::sentiment_counts::SentimentCounts;
    use crate::repositories::classifier::Classifier;
    use crate::value_objects::label::SentimentLabel;
    use std::cell::Cell;

    struct KeywordClassifier {
        calls: Cell<usize>,
    }

    impl Classifier for KeywordClassifier {
        fn classify(&self, text: &str) -> SentimentLabel {
            self.calls.set(self.calls.get() + 1);
            if text.contains("bagus") {
                SentimentLabel::Positive
            } else if text.contains("jelek") {
                SentimentLabel::Negative
            } else {
                SentimentLabel::Neutral
            }
        }
    }

    #[test]
    fn in_batch_duplicates_are_classified_once() {
        let classifier = KeywordClassifier { calls: Cell::new(0) };
        let mut counts = SentimentCounts::default();
        let mut dataset = ProcessedDataset::new();

        let out = classify_batch(
            &mut counts,
            &mut dataset,
            &["bagus", "biasa saja", "bagus"],
            &classifier,
        );

        assert_eq!(classifier.calls.get(), 2);
        assert_eq!(
            out.labels(),
            vec![
                Some(SentimentLabel::Positive),
                Some(SentimentLabel::Neutral),
                Some(SentimentLabel::Positive),
            ]
        );
        assert_eq!(out.rows[2].source, RowSource::Cached);
        assert_eq!(out.cache_hits, 1);
        assert_eq!(out.fresh.len(), 2);
        assert_eq!(counts.total(), 2);
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn blank_rows_are_skipped_without_mutation() {
        let classifier = KeywordClassifier { calls: Cell::new(0) };
        let mut counts = SentimentCounts::default();
        let mut dataset = ProcessedDataset::new();

        let out = classify_batch(&mut counts, &mut dataset, &["", "   "], &classifier);

        assert_eq!(classifier.calls.get(), 0);
        assert_eq!(out.skipped_rows, vec![0, 1]);
        assert!(!out.is_dirty());
        assert!(counts.is_empty());
        assert!(dataset.is_empty());
    }

    #[test]
    fn cached_texts_do_not_count_again() {
        let classifier = KeywordClassifier { calls: Cell::new(0) };
        let mut counts = SentimentCounts::default();
        let mut dataset = ProcessedDataset::new();
        dataset.insert("jelek", SentimentLabel::Negative);

        let out = classify_batch(&mut counts, &mut dataset, &["jelek"], &classifier);

        assert_eq!(classifier.calls.get(), 0);
        assert_eq!(out.labels(), vec![Some(SentimentLabel::Negative)]);
        assert!(counts.is_empty());
    }
}
