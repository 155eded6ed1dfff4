use sentimen_domain::value_objects::label::SentimentLabel;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LinearModelArtifact {
    classes: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

/// Linear decision function over TF-IDF features (one-vs-rest, or a single
/// row for the two-class case).
#[derive(Debug, Clone)]
pub struct LinearModel {
    classes: Vec<SentimentLabel>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

impl LinearModel {
    pub fn from_json(raw: &str, n_features: usize) -> Result<Self, String> {
        let artifact: LinearModelArtifact = serde_json::from_str(raw)
            .map_err(|err| format!("invalid classifier artifact: {err}"))?;

        let classes = artifact
            .classes
            .iter()
            .map(|c| SentimentLabel::parse(c))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| format!("invalid classifier classes: {err}"))?;
        if classes.len() < 2 {
            return Err(format!(
                "classifier needs at least 2 classes, got {}",
                classes.len()
            ));
        }

        let binary = artifact.coef.len() == 1 && classes.len() == 2;
        if !binary && artifact.coef.len() != classes.len() {
            return Err(format!(
                "classifier has {} coef rows for {} classes",
                artifact.coef.len(),
                classes.len()
            ));
        }
        if artifact.intercept.len() != artifact.coef.len() {
            return Err(format!(
                "classifier has {} intercepts for {} coef rows",
                artifact.intercept.len(),
                artifact.coef.len()
            ));
        }
        if let Some((row, coef)) = artifact
            .coef
            .iter()
            .enumerate()
            .find(|(_, coef)| coef.len() != n_features)
        {
            return Err(format!(
                "classifier coef row {row} has {} weights but vectorizer has {n_features} features",
                coef.len()
            ));
        }
        let non_finite = artifact.coef.iter().flatten().any(|w| !w.is_finite())
            || artifact.intercept.iter().any(|b| !b.is_finite());
        if non_finite {
            return Err("classifier contains non-finite weights".to_string());
        }

        Ok(Self {
            classes,
            coef: artifact.coef,
            intercept: artifact.intercept,
        })
    }

    pub fn classes(&self) -> &[SentimentLabel] {
        &self.classes
    }

    pub fn decision_function(&self, features: &[(usize, f64)]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(weights, bias)| {
                features
                    .iter()
                    .map(|(idx, value)| weights[*idx] * value)
                    .sum::<f64>()
                    + bias
            })
            .collect()
    }

    pub fn predict(&self, features: &[(usize, f64)]) -> SentimentLabel {
        let scores = self.decision_function(features);
        if scores.len() == 1 {
            return if scores[0] > 0.0 {
                self.classes[1]
            } else {
                self.classes[0]
            };
        }

        let mut best = 0;
        for (idx, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = idx;
            }
        }
        self.classes[best]
    }
}

#[cfg(test)]
mod tests {
    use super::LinearModel;
    use sentimen_domain::value_objects::label::SentimentLabel;

    const THREE_CLASS: &str = r#"{
        "classes": ["negatif", "netral", "positif"],
        "coef": [[-1.0, 2.0], [0.0, 0.0], [2.0, -1.0]],
        "intercept": [0.0, 0.1, 0.0]
    }"#;

    #[test]
    fn argmax_over_classes() {
        let model = LinearModel::from_json(THREE_CLASS, 2).expect("model");
        assert_eq!(model.predict(&[(0, 1.0)]), SentimentLabel::Positive);
        assert_eq!(model.predict(&[(1, 1.0)]), SentimentLabel::Negative);
        assert_eq!(model.predict(&[]), SentimentLabel::Neutral);
    }

    #[test]
    fn ties_pick_first_class() {
        let raw = r#"{"classes": ["netral", "positif"], "coef": [[0.0], [0.0]], "intercept": [0.0, 0.0]}"#;
        let model = LinearModel::from_json(raw, 1).expect("model");
        assert_eq!(model.predict(&[(0, 1.0)]), SentimentLabel::Neutral);
    }

    #[test]
    fn binary_single_row_uses_sign() {
        let raw = r#"{"classes": ["negatif", "positif"], "coef": [[1.5]], "intercept": [-0.5]}"#;
        let model = LinearModel::from_json(raw, 1).expect("model");
        assert_eq!(model.predict(&[(0, 1.0)]), SentimentLabel::Positive);
        assert_eq!(model.predict(&[]), SentimentLabel::Negative);
    }

    #[test]
    fn rejects_shape_mismatch() {
        assert!(LinearModel::from_json(THREE_CLASS, 3).is_err());
        let raw = r#"{"classes": ["negatif", "netral", "positif"], "coef": [[1.0]], "intercept": [0.0]}"#;
        assert!(LinearModel::from_json(raw, 1).is_err());
    }

    #[test]
    fn rejects_unknown_class() {
        let raw = r#"{"classes": ["negatif", "marah"], "coef": [[1.0]], "intercept": [0.0]}"#;
        let err = LinearModel::from_json(raw, 1).expect_err("unknown class");
        assert!(err.contains("marah"));
    }
}
