use crate::value_objects::label::SentimentLabel;

/// Opaque pre-trained text classifier.
///
/// Deterministic for a fixed loaded model and infallible for any input;
/// loading problems are reported when the adapter is constructed.
pub trait Classifier {
    fn classify(&self, text: &str) -> SentimentLabel;
}
