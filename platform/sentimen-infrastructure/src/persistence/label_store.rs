use super::{read_optional, record_read_metrics, record_write_metrics, write_json_pretty};
use sentimen_domain::entities::sentiment_counts::SentimentCounts;
use sentimen_domain::repositories::label_store::LabelStore;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Label counts stored as a single JSON object keyed by label.
#[derive(Debug, Clone)]
pub struct JsonLabelStore {
    path: PathBuf,
}

impl JsonLabelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_inner(&self) -> Result<SentimentCounts, String> {
        let Some(contents) = read_optional(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "label store missing; starting from zero");
            return Ok(SentimentCounts::default());
        };

        match serde_json::from_slice::<SentimentCounts>(&contents) {
            Ok(counts) => Ok(counts),
            Err(err) => {
                metrics::counter!("sentimen.infra.label_store.malformed_total").increment(1);
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "label store unreadable; starting from zero"
                );
                Ok(SentimentCounts::default())
            }
        }
    }
}

impl LabelStore for JsonLabelStore {
    fn load(&self) -> Result<SentimentCounts, String> {
        let start = Instant::now();
        let result = self.load_inner();
        record_read_metrics("label_store", start, &result);
        result
    }

    fn save(&self, counts: &SentimentCounts) -> Result<(), String> {
        let start = Instant::now();
        let result = write_json_pretty(&self.path, counts);
        record_write_metrics("label_store", start, &result);
        result
    }
}
