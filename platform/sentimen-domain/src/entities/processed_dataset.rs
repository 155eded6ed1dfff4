use crate::value_objects::label::SentimentLabel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A distinct text that has been classified once, with its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedEntry {
    #[serde(alias = "teks")]
    pub text: String,
    #[serde(alias = "sentimen")]
    pub label: SentimentLabel,
}

impl ProcessedEntry {
    pub fn new(text: impl Into<String>, label: SentimentLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Every text ever classified, in insertion order, with an exact-match index.
///
/// Lookups are case- and whitespace-sensitive. When the backing sequence holds
/// the same text more than once, the first entry wins.
#[derive(Debug, Clone, Default)]
pub struct ProcessedDataset {
    entries: Vec<ProcessedEntry>,
    index: HashMap<String, SentimentLabel>,
}

impl ProcessedDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<ProcessedEntry>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for entry in &entries {
            index.entry(entry.text.clone()).or_insert(entry.label);
        }
        Self { entries, index }
    }

    pub fn lookup(&self, text: &str) -> Option<SentimentLabel> {
        self.index.get(text).copied()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.index.contains_key(text)
    }

    /// Records a first-time classification. Returns `false` (and changes
    /// nothing) when the text is already known.
    pub fn insert(&mut self, text: &str, label: SentimentLabel) -> bool {
        if self.index.contains_key(text) {
            return false;
        }
        self.index.insert(text.to_string(), label);
        self.entries.push(ProcessedEntry::new(text, label));
        true
    }

    pub fn entries(&self) -> &[ProcessedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of stored entries shadowed by an earlier entry with the same text.
    pub fn shadowed_entries(&self) -> usize {
        self.entries.len() - self.index.len()
    }
}

impl PartialEq for ProcessedDataset {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for ProcessedDataset {}
