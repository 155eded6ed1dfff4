use super::{read_optional, record_read_metrics, record_write_metrics, write_json_pretty};
use sentimen_domain::entities::processed_dataset::{ProcessedDataset, ProcessedEntry};
use sentimen_domain::repositories::result_cache::ResultCacheRepository;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Classified texts stored as a JSON array of `{"text", "label"}` objects.
///
/// A file that exists but does not parse is an error; it is never treated as
/// an empty cache.
#[derive(Debug, Clone)]
pub struct JsonResultCache {
    path: PathBuf,
}

impl JsonResultCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_inner(&self) -> Result<ProcessedDataset, String> {
        let Some(contents) = read_optional(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "result cache missing; starting empty");
            return Ok(ProcessedDataset::new());
        };

        let entries: Vec<ProcessedEntry> = serde_json::from_slice(&contents).map_err(|err| {
            format!(
                "failed to parse result cache {}: {}",
                self.path.display(),
                err
            )
        })?;
        let dataset = ProcessedDataset::from_entries(entries);
        if dataset.shadowed_entries() > 0 {
            tracing::warn!(
                path = %self.path.display(),
                duplicates = dataset.shadowed_entries(),
                "result cache holds repeated texts; first label wins"
            );
        }
        Ok(dataset)
    }
}

impl ResultCacheRepository for JsonResultCache {
    fn load(&self) -> Result<ProcessedDataset, String> {
        let start = Instant::now();
        let result = self.load_inner();
        record_read_metrics("result_cache", start, &result);
        result
    }

    fn save(&self, dataset: &ProcessedDataset) -> Result<(), String> {
        let start = Instant::now();
        let result = write_json_pretty(&self.path, dataset.entries());
        record_write_metrics("result_cache", start, &result);
        result
    }
}
