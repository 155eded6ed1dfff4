use crate::entities::processed_dataset::ProcessedDataset;

/// Persisted record of every distinct text classified so far.
///
/// A missing backing store loads as an empty dataset. `save` always writes
/// the full sequence.
pub trait ResultCacheRepository {
    fn load(&self) -> Result<ProcessedDataset, String>;
    fn save(&self, dataset: &ProcessedDataset) -> Result<(), String>;
}
