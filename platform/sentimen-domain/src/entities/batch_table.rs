use crate::value_objects::label::SentimentLabel;

/// An uploaded CSV batch: header row plus string cells.
///
/// Only the text column is interpreted; every other column is carried
/// through untouched so the labelled table mirrors the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    text_index: usize,
    label_index: Option<usize>,
}

impl BatchTable {
    pub fn new(
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        text_column: &str,
        label_column: &str,
    ) -> Result<Self, String> {
        let text_index = headers
            .iter()
            .position(|h| h == text_column)
            .ok_or_else(|| format!("batch must have a '{text_column}' column"))?;
        let label_index = headers.iter().position(|h| h == label_column);
        Ok(Self {
            headers,
            rows,
            text_index,
            label_index,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text cell of every row; short rows yield an empty string.
    pub fn texts(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.get(self.text_index).map(String::as_str).unwrap_or(""))
            .collect()
    }

    pub fn has_label_column(&self) -> bool {
        self.label_index.is_some()
    }

    /// Returns a copy with the label column filled in (appended if absent).
    /// Rows with no label get an empty cell.
    pub fn with_labels(
        &self,
        label_column: &str,
        labels: &[Option<SentimentLabel>],
    ) -> Result<BatchTable, String> {
        if labels.len() != self.rows.len() {
            return Err(format!(
                "label count mismatch: rows={} labels={}",
                self.rows.len(),
                labels.len()
            ));
        }

        let mut headers = self.headers.clone();
        let label_index = match self.label_index {
            Some(idx) => idx,
            None => {
                headers.push(label_column.to_string());
                headers.len() - 1
            }
        };

        let rows = self
            .rows
            .iter()
            .zip(labels)
            .map(|(row, label)| {
                let mut row = row.clone();
                if row.len() <= label_index {
                    row.resize(label_index + 1, String::new());
                }
                row[label_index] = label.map(|l| l.as_str().to_string()).unwrap_or_default();
                row
            })
            .collect();

        Ok(BatchTable {
            headers,
            rows,
            text_index: self.text_index,
            label_index: Some(label_index),
        })
    }

    /// Label cell of every row, if the table has a label column.
    pub fn labels(&self) -> Option<Vec<&str>> {
        let idx = self.label_index?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }
}
