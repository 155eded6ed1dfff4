use crate::persistence::write_atomic;
use sentimen_domain::entities::batch_table::BatchTable;
use sentimen_domain::repositories::batch_io::{BatchQuery, BatchReader, BatchWriter};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Instant;

/// CSV batches on the local filesystem.
///
/// Rows may have differing widths; the header row defines the columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemCsvBatch;

fn record_batch_metrics<T>(op: &'static str, start: Instant, result: &Result<T, String>) {
    let result_label = if result.is_ok() { "ok" } else { "err" };
    metrics::counter!(
        "sentimen.infra.batch_csv.calls_total",
        "op" => op,
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!("sentimen.infra.batch_csv.duration_ms", "op" => op)
        .record(start.elapsed().as_millis() as f64);
}

/// Parses a CSV document whose first record is the header row.
pub fn parse_table<R: Read>(
    input: R,
    text_column: &str,
    label_column: &str,
) -> Result<BatchTable, String> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|err| format!("failed to read csv header: {err}"))?
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            if idx == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.map_err(|err| format!("failed to read csv row {}: {err}", idx + 1))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    BatchTable::new(headers, rows, text_column, label_column)
}

/// Writes the header row followed by every row.
pub fn write_table<W: Write>(out: W, table: &BatchTable) -> Result<(), String> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);
    wtr.write_record(table.headers())
        .map_err(|err| format!("failed to write csv header: {err}"))?;
    for row in table.rows() {
        wtr.write_record(row)
            .map_err(|err| format!("failed to write csv row: {err}"))?;
    }
    wtr.flush()
        .map_err(|err| format!("failed to flush csv output: {err}"))
}

impl BatchReader for FilesystemCsvBatch {
    fn read_batch(&self, query: &BatchQuery<'_>) -> Result<BatchTable, String> {
        let start = Instant::now();
        let result = File::open(query.path)
            .map_err(|err| format!("failed to open {}: {}", query.path.display(), err))
            .and_then(|file| {
                parse_table(io::BufReader::new(file), query.text_column, query.label_column)
                    .map_err(|err| format!("{}: {err}", query.path.display()))
            });
        record_batch_metrics("read", start, &result);
        if let Ok(table) = &result {
            tracing::debug!(path = %query.path.display(), rows = table.len(), "batch read");
        }
        result
    }
}

impl BatchWriter for FilesystemCsvBatch {
    fn write_batch(&self, path: &Path, table: &BatchTable) -> Result<(), String> {
        let start = Instant::now();
        let mut buf = Vec::new();
        let result = write_table(&mut buf, table).and_then(|_| write_atomic(path, &buf));
        record_batch_metrics("write", start, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_table, write_table, FilesystemCsvBatch};
    use crate::persistence::test_support::unique_tmp_path;
    use sentimen_domain::repositories::batch_io::{BatchQuery, BatchReader, BatchWriter};
    use sentimen_domain::value_objects::label::SentimentLabel;
    use std::fs;

    #[test]
    fn parses_quoted_cells_and_ragged_rows() {
        let raw = "id,text\n1,\"bagus, sekali\"\n2\n";
        let table = parse_table(raw.as_bytes(), "text", "label").expect("table");
        assert_eq!(table.headers(), ["id", "text"]);
        assert_eq!(table.texts(), vec!["bagus, sekali", ""]);
        assert!(!table.has_label_column());
    }

    #[test]
    fn strips_byte_order_mark_from_first_header() {
        let raw = "\u{feff}text\nhalo\n";
        let table = parse_table(raw.as_bytes(), "text", "label").expect("table");
        assert_eq!(table.texts(), vec!["halo"]);
    }

    #[test]
    fn missing_text_column_is_an_error() {
        let err = parse_table("review\nbagus\n".as_bytes(), "text", "label").expect_err("no text");
        assert!(err.contains("'text'"));
    }

    #[test]
    fn write_then_read_keeps_extra_columns() {
        let path = unique_tmp_path("batch_out.csv");
        let table = parse_table("id,text\n7,mantap\n".as_bytes(), "text", "label").expect("table");
        let labelled = table
            .with_labels("label", &[Some(SentimentLabel::Positive)])
            .expect("labels");

        FilesystemCsvBatch.write_batch(&path, &labelled).expect("write");
        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "id,text,label\n7,mantap,positif\n"
        );

        let reread = FilesystemCsvBatch
            .read_batch(&BatchQuery {
                path: &path,
                text_column: "text",
                label_column: "label",
            })
            .expect("reread");
        assert_eq!(reread.labels(), Some(vec!["positif"]));
    }

    #[test]
    fn missing_input_file_is_an_error() {
        let path = unique_tmp_path("absent.csv");
        let err = FilesystemCsvBatch
            .read_batch(&BatchQuery {
                path: &path,
                text_column: "text",
                label_column: "label",
            })
            .expect_err("missing");
        assert!(err.contains("failed to open"));
    }

    #[test]
    fn write_table_quotes_when_needed() {
        let table = parse_table("text\n\"a, b\"\n".as_bytes(), "text", "label").expect("table");
        let mut out = Vec::new();
        write_table(&mut out, &table).expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "text\n\"a, b\"\n");
    }
}
