use sentimen_domain::entities::processed_dataset::ProcessedDataset;
use sentimen_domain::entities::sentiment_counts::SentimentCounts;
use sentimen_domain::repositories::classifier::Classifier;
use sentimen_domain::repositories::label_store::LabelStore;
use sentimen_domain::repositories::result_cache::ResultCacheRepository;
use sentimen_domain::services::classification::{classify_batch, is_blank};
use sentimen_domain::value_objects::label::SentimentLabel;
use std::time::Instant;
use tracing::info_span;

/// Process-wide classification state, owned by the caller and threaded
/// through every use case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub counts: SentimentCounts,
    pub dataset: ProcessedDataset,
}

/// Classifier plus both stores, as needed by every classifying use case.
#[derive(Clone, Copy)]
pub struct ClassifyPorts<'a> {
    pub classifier: &'a dyn Classifier,
    pub label_store: &'a dyn LabelStore,
    pub result_cache: &'a dyn ResultCacheRepository,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub labels: Vec<Option<SentimentLabel>>,
    pub classified: usize,
    pub cache_hits: usize,
    pub skipped_rows: Vec<usize>,
    pub persisted: bool,
}

impl BatchReport {
    pub fn rows(&self) -> usize {
        self.labels.len()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "rows": self.rows(),
            "classified": self.classified,
            "cache_hits": self.cache_hits,
            "skipped": self.skipped_rows.len(),
            "skipped_rows": self.skipped_rows,
            "persisted": self.persisted,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing was classified or stored.
    Empty,
    Classified { label: SentimentLabel, cached: bool },
}

pub fn load_session(
    label_store: &dyn LabelStore,
    result_cache: &dyn ResultCacheRepository,
) -> Result<SessionState, String> {
    let _span = info_span!("load_session").entered();

    let stage_start = Instant::now();
    let counts = label_store.load()?;
    let dataset = result_cache.load()?;
    metrics::histogram!("sentimen.session.load_ms")
        .record(stage_start.elapsed().as_millis() as f64);

    if counts.total() as usize != dataset.len() {
        tracing::warn!(
            counts_total = counts.total(),
            cache_entries = dataset.len(),
            "label store and result cache disagree"
        );
    }
    tracing::info!(
        counts_total = counts.total(),
        cache_entries = dataset.len(),
        "session loaded"
    );

    Ok(SessionState { counts, dataset })
}

/// Writes the result cache, then the label store. An interrupted write can
/// leave counts behind the cache, never ahead of it.
pub fn persist(
    state: &SessionState,
    label_store: &dyn LabelStore,
    result_cache: &dyn ResultCacheRepository,
) -> Result<(), String> {
    let stage_start = Instant::now();
    result_cache.save(&state.dataset)?;
    label_store.save(&state.counts)?;
    metrics::histogram!("sentimen.pipeline.persist_ms")
        .record(stage_start.elapsed().as_millis() as f64);
    Ok(())
}

/// Labels a batch of texts, classifying only unseen ones, and persists both
/// stores once if anything new was learned.
pub fn process_batch<S: AsRef<str>>(
    state: &mut SessionState,
    texts: &[S],
    ports: ClassifyPorts<'_>,
) -> Result<BatchReport, String> {
    let _span = info_span!("process_batch", rows = texts.len()).entered();

    let stage_start = Instant::now();
    let outcome = classify_batch(
        &mut state.counts,
        &mut state.dataset,
        texts,
        ports.classifier,
    );
    metrics::histogram!("sentimen.pipeline.classify_ms")
        .record(stage_start.elapsed().as_millis() as f64);

    metrics::counter!("sentimen.pipeline.rows_total").increment(texts.len() as u64);
    metrics::counter!("sentimen.pipeline.cache_hits_total").increment(outcome.cache_hits as u64);
    metrics::counter!("sentimen.pipeline.skipped_total")
        .increment(outcome.skipped_rows.len() as u64);
    for entry in &outcome.fresh {
        metrics::counter!("sentimen.pipeline.classified_total", "label" => entry.label.as_str())
            .increment(1);
    }

    if !outcome.skipped_rows.is_empty() {
        tracing::warn!(
            skipped = outcome.skipped_rows.len(),
            first_skipped_row = outcome.skipped_rows[0],
            "skipped rows with empty text"
        );
    }

    let persisted = outcome.is_dirty();
    if persisted {
        persist(state, ports.label_store, ports.result_cache)?;
    }

    tracing::info!(
        classified = outcome.fresh.len(),
        cache_hits = outcome.cache_hits,
        skipped = outcome.skipped_rows.len(),
        persisted,
        "batch processed"
    );

    Ok(BatchReport {
        labels: outcome.labels(),
        classified: outcome.fresh.len(),
        cache_hits: outcome.cache_hits,
        skipped_rows: outcome.skipped_rows,
        persisted,
    })
}

/// Single-text submission: a batch of one, except blank input is reported
/// back instead of being skipped silently.
pub fn submit_text(
    state: &mut SessionState,
    text: &str,
    ports: ClassifyPorts<'_>,
) -> Result<SubmitOutcome, String> {
    if is_blank(text) {
        tracing::warn!("empty text submitted; nothing classified");
        return Ok(SubmitOutcome::Empty);
    }

    let cached = state.dataset.contains(text);
    let report = process_batch(state, &[text], ports)?;
    let label = report
        .labels
        .first()
        .copied()
        .flatten()
        .ok_or_else(|| "classification produced no label".to_string())?;

    Ok(SubmitOutcome::Classified { label, cached })
}
