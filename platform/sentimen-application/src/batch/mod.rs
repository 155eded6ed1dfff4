use crate::config::Config;
use crate::pipeline::{process_batch, BatchReport, ClassifyPorts, SessionState};
use sentimen_domain::entities::batch_table::BatchTable;
use sentimen_domain::repositories::batch_io::{BatchQuery, BatchReader, BatchWriter};
use std::path::Path;
use std::time::Instant;
use tracing::info_span;

#[derive(Debug, Clone)]
pub struct CsvBatchResult {
    pub table: BatchTable,
    pub report: BatchReport,
}

/// Reads a CSV batch, labels every row and optionally writes the labelled
/// table to `out`.
///
/// A batch without the configured text column is rejected before any
/// classification, so neither store is touched.
pub fn classify_csv(
    config: &Config,
    input: &Path,
    out: Option<&Path>,
    state: &mut SessionState,
    ports: ClassifyPorts<'_>,
    reader: &dyn BatchReader,
    writer: &dyn BatchWriter,
) -> Result<CsvBatchResult, String> {
    let _span = info_span!(
        "classify_csv",
        input = %input.display(),
        text_column = %config.csv.text_column
    )
    .entered();

    let stage_start = Instant::now();
    let table = reader.read_batch(&BatchQuery {
        path: input,
        text_column: &config.csv.text_column,
        label_column: &config.csv.label_column,
    })?;
    metrics::histogram!("sentimen.batch.read_ms").record(stage_start.elapsed().as_millis() as f64);
    metrics::gauge!("sentimen.batch.rows").set(table.len() as f64);

    if table.has_label_column() {
        tracing::info!(
            label_column = %config.csv.label_column,
            "existing label column will be overwritten"
        );
    }

    let texts = table.texts();
    let report = process_batch(state, &texts, ports)?;
    let labelled = table.with_labels(&config.csv.label_column, &report.labels)?;

    if let Some(out) = out {
        let stage_start = Instant::now();
        writer.write_batch(out, &labelled)?;
        metrics::histogram!("sentimen.batch.write_ms")
            .record(stage_start.elapsed().as_millis() as f64);
        tracing::info!(out = %out.display(), rows = labelled.len(), "wrote labelled batch");
    }

    Ok(CsvBatchResult {
        table: labelled,
        report,
    })
}
