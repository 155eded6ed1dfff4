use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub csv: CsvConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct StorageConfig {
    pub label_store_path: PathBuf,
    pub result_cache_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            label_store_path: PathBuf::from("sentiment_data.json"),
            result_cache_path: PathBuf::from("processed_dataset.json"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ModelConfig {
    pub vectorizer_path: PathBuf,
    pub classifier_path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            vectorizer_path: PathBuf::from("tfidf_vectorizer.json"),
            classifier_path: PathBuf::from("svm_sentiment_model.json"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct CsvConfig {
    pub text_column: String,
    pub label_column: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            text_column: "text".to_string(),
            label_column: "label".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.csv.text_column.trim().is_empty() {
            return Err("csv.text_column must not be empty".to_string());
        }
        if self.csv.label_column.trim().is_empty() {
            return Err("csv.label_column must not be empty".to_string());
        }
        if self.csv.text_column == self.csv.label_column {
            return Err("csv.text_column and csv.label_column must differ".to_string());
        }
        if self.storage.label_store_path == self.storage.result_cache_path {
            return Err(
                "storage.label_store_path and storage.result_cache_path must differ".to_string(),
            );
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    load_config_from_str(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))
}

pub fn load_config_from_str(contents: &str) -> Result<Config, String> {
    let config: Config = toml::from_str(contents).map_err(|err| err.to_string())?;
    config.validate()?;
    Ok(config)
}

/// Loads `path` when given, otherwise falls back to built-in defaults.
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, String> {
    match path {
        Some(path) => load_config(path),
        None => Ok(Config::default()),
    }
}

pub fn to_toml_pretty(config: &Config) -> Result<String, String> {
    toml::to_string_pretty(config)
        .map_err(|err| format!("failed to serialize config as TOML: {err}"))
}

#[cfg(test)]
mod tests {
    use super::{load_config_from_str, to_toml_pretty, Config, LogFormat};
    use std::path::PathBuf;

    #[test]
    fn parse_config_rejects_malformed_toml() {
        let err = load_config_from_str("[storage\nlabel_store_path = 1").expect_err("malformed");
        assert!(!err.is_empty());
    }

    #[test]
    fn parse_config_rejects_unknown_fields() {
        let toml_str = r#"
[storage]
label_store_path = "counts.json"
unknown_field = 123
"#;
        let err = load_config_from_str(toml_str).expect_err("unknown field should fail");
        assert!(err.to_lowercase().contains("unknown field"));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = load_config_from_str("").expect("empty config");
        assert_eq!(config, Config::default());
        assert_eq!(
            config.storage.label_store_path,
            PathBuf::from("sentiment_data.json")
        );
        assert_eq!(config.csv.text_column, "text");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn parse_partial_sections() {
        let toml_str = r#"
[model]
vectorizer_path = "models/vec.json"

[csv]
text_column = "teks"
label_column = "sentimen"

[logging]
format = "json"
"#;
        let config = load_config_from_str(toml_str).expect("config");
        assert_eq!(config.model.vectorizer_path, PathBuf::from("models/vec.json"));
        assert_eq!(
            config.model.classifier_path,
            PathBuf::from("svm_sentiment_model.json")
        );
        assert_eq!(config.csv.text_column, "teks");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn validate_rejects_clashing_columns() {
        let toml_str = r#"
[csv]
text_column = "text"
label_column = "text"
"#;
        assert!(load_config_from_str(toml_str).is_err());
    }

    #[test]
    fn toml_round_trip() {
        let config = Config::default();
        let raw = to_toml_pretty(&config).expect("serialize");
        assert_eq!(load_config_from_str(&raw).expect("reparse"), config);
    }
}
