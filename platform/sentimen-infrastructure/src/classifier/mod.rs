pub mod linear;
pub mod tfidf;

use linear::LinearModel;
use sentimen_domain::repositories::classifier::Classifier;
use sentimen_domain::value_objects::label::SentimentLabel;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tfidf::TfidfVectorizer;

/// Provenance of the loaded model artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub vectorizer_path: PathBuf,
    pub classifier_path: PathBuf,
    pub vectorizer_sha256: String,
    pub classifier_sha256: String,
    pub vocabulary_size: usize,
    pub classes: Vec<SentimentLabel>,
}

/// TF-IDF features fed into a linear model, both loaded once from JSON
/// artifacts and held read-only for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct LinearTfidfClassifier {
    vectorizer: TfidfVectorizer,
    model: LinearModel,
    info: ModelInfo,
}

fn read_artifact(kind: &str, path: &Path) -> Result<(String, String), String> {
    let bytes = fs::read(path)
        .map_err(|err| format!("failed to read {kind} artifact {}: {}", path.display(), err))?;
    let digest = Sha256::digest(&bytes);
    let raw = String::from_utf8(bytes)
        .map_err(|err| format!("{kind} artifact {} is not UTF-8: {}", path.display(), err))?;
    Ok((raw, to_hex(&digest[..])))
}

fn to_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
    out
}

impl LinearTfidfClassifier {
    pub fn load(vectorizer_path: &Path, classifier_path: &Path) -> Result<Self, String> {
        let _span = tracing::info_span!(
            "classifier.load",
            vectorizer = %vectorizer_path.display(),
            classifier = %classifier_path.display()
        )
        .entered();

        let (vectorizer_raw, vectorizer_sha256) = read_artifact("vectorizer", vectorizer_path)?;
        let vectorizer = TfidfVectorizer::from_json(&vectorizer_raw)
            .map_err(|err| format!("{}: {err}", vectorizer_path.display()))?;

        let (classifier_raw, classifier_sha256) = read_artifact("classifier", classifier_path)?;
        let model = LinearModel::from_json(&classifier_raw, vectorizer.n_features())
            .map_err(|err| format!("{}: {err}", classifier_path.display()))?;

        let info = ModelInfo {
            vectorizer_path: vectorizer_path.to_path_buf(),
            classifier_path: classifier_path.to_path_buf(),
            vectorizer_sha256,
            classifier_sha256,
            vocabulary_size: vectorizer.vocabulary_size(),
            classes: model.classes().to_vec(),
        };
        tracing::info!(
            vocabulary_size = info.vocabulary_size,
            classes = info.classes.len(),
            vectorizer_sha256 = %info.vectorizer_sha256,
            classifier_sha256 = %info.classifier_sha256,
            "classifier loaded"
        );

        Ok(Self {
            vectorizer,
            model,
            info,
        })
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }
}

impl Classifier for LinearTfidfClassifier {
    fn classify(&self, text: &str) -> SentimentLabel {
        let start = Instant::now();
        let features = self.vectorizer.transform(text);
        let label = self.model.predict(&features);
        metrics::counter!("sentimen.infra.classifier.calls_total", "label" => label.as_str())
            .increment(1);
        metrics::histogram!("sentimen.infra.classifier.latency_us")
            .record(start.elapsed().as_micros() as f64);
        label
    }
}
