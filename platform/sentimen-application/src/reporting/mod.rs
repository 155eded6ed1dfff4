use crate::pipeline::SessionState;
use sentimen_domain::services::statistics::{summarize, StatsView};
use tracing::info_span;

#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub view: StatsView,
    pub cache_entries: usize,
}

impl StatsReport {
    pub fn to_json(&self) -> Result<serde_json::Value, String> {
        let mut json = serde_json::to_value(&self.view)
            .map_err(|err| format!("failed to serialize stats: {err}"))?;
        if let Some(obj) = json.as_object_mut() {
            obj.insert(
                "cache_entries".to_string(),
                serde_json::Value::from(self.cache_entries),
            );
        }
        Ok(json)
    }
}

pub fn sentiment_stats(state: &SessionState) -> StatsReport {
    let _span = info_span!("sentiment_stats").entered();

    let view = summarize(&state.counts);
    metrics::gauge!("sentimen.stats.total").set(state.counts.total() as f64);
    metrics::gauge!("sentimen.stats.cache_entries").set(state.dataset.len() as f64);

    StatsReport {
        view,
        cache_entries: state.dataset.len(),
    }
}
