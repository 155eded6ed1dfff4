use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    L1,
    None,
}

fn default_true() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// TF-IDF vectorizer exported from the training pipeline.
///
/// Tokens are runs of at least two word characters (alphanumeric or `_`),
/// optionally lowercased, joined with a single space into n-grams.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "default_true")]
    lowercase: bool,
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    norm: Norm,
}

/// Sparse feature vector sorted by column index.
pub type SparseVector = Vec<(usize, f64)>;

impl TfidfVectorizer {
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let vectorizer: TfidfVectorizer = serde_json::from_str(raw)
            .map_err(|err| format!("invalid vectorizer artifact: {err}"))?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    fn validate(&self) -> Result<(), String> {
        if self.vocabulary.is_empty() {
            return Err("vectorizer vocabulary is empty".to_string());
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range: ({min_n}, {max_n})"));
        }
        if let Some((term, idx)) = self
            .vocabulary
            .iter()
            .find(|(_, idx)| **idx >= self.idf.len())
        {
            return Err(format!(
                "vocabulary term '{term}' maps to column {idx} but idf has {} entries",
                self.idf.len()
            ));
        }
        if self.idf.iter().any(|v| !v.is_finite()) {
            return Err("idf contains non-finite values".to_string());
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= 2)
            .map(str::to_string)
            .collect()
    }

    fn ngrams(&self, tokens: &[String]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut out = Vec::new();
        for n in min_n..=max_n {
            if n == 1 {
                out.extend(tokens.iter().cloned());
                continue;
            }
            out.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        out
    }

    pub fn transform(&self, text: &str) -> SparseVector {
        let tokens = self.tokenize(text);
        let mut term_counts: BTreeMap<usize, f64> = BTreeMap::new();
        for gram in self.ngrams(&tokens) {
            if let Some(idx) = self.vocabulary.get(&gram) {
                *term_counts.entry(*idx).or_insert(0.0) += 1.0;
            }
        }

        let mut features: SparseVector = term_counts
            .into_iter()
            .map(|(idx, count)| {
                let tf = if self.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                (idx, tf * self.idf[idx])
            })
            .collect();

        let norm = match self.norm {
            Norm::L2 => features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Norm::L1 => features.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            Norm::None => 0.0,
        };
        if norm > 0.0 {
            for (_, value) in &mut features {
                *value /= norm;
            }
        }
        features
    }
}
