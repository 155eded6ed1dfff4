use crate::render;
use sentimen_application::batch::classify_csv;
use sentimen_application::config::{to_toml_pretty, Config};
use sentimen_application::pipeline::{load_session, submit_text, ClassifyPorts, SessionState};
use sentimen_application::reporting::sentiment_stats;
use sentimen_infrastructure::batch_csv::{write_table, FilesystemCsvBatch};
use sentimen_infrastructure::classifier::LinearTfidfClassifier;
use sentimen_infrastructure::persistence::label_store::JsonLabelStore;
use sentimen_infrastructure::persistence::result_cache::JsonResultCache;
use std::path::Path;

/// What a command wants printed: `stdout` is the command's result, `notice`
/// goes to stderr.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub notice: Option<String>,
}

impl CommandOutput {
    fn stdout(stdout: String) -> Self {
        Self {
            stdout,
            notice: None,
        }
    }
}

struct Stores {
    label_store: JsonLabelStore,
    result_cache: JsonResultCache,
}

impl Stores {
    fn from_config(config: &Config) -> Self {
        Self {
            label_store: JsonLabelStore::new(&config.storage.label_store_path),
            result_cache: JsonResultCache::new(&config.storage.result_cache_path),
        }
    }

    fn load(&self) -> Result<SessionState, String> {
        load_session(&self.label_store, &self.result_cache)
    }

    fn ports<'a>(&'a self, classifier: &'a LinearTfidfClassifier) -> ClassifyPorts<'a> {
        ClassifyPorts {
            classifier,
            label_store: &self.label_store,
            result_cache: &self.result_cache,
        }
    }
}

fn load_classifier(config: &Config) -> Result<LinearTfidfClassifier, String> {
    LinearTfidfClassifier::load(&config.model.vectorizer_path, &config.model.classifier_path)
        .map_err(|err| format!("failed to load sentiment model: {err}"))
}

fn json_line(value: &serde_json::Value) -> Result<String, String> {
    serde_json::to_string(value).map_err(|err| format!("failed to serialize output: {err}"))
}

pub fn classify(config: &Config, text: &str, json: bool) -> Result<CommandOutput, String> {
    let classifier = load_classifier(config)?;
    let stores = Stores::from_config(config);
    let mut state = stores.load()?;

    let outcome = submit_text(&mut state, text, stores.ports(&classifier))?;
    let stdout = if json {
        json_line(&render::submit_json(&outcome))?
    } else {
        render::submit_text(&outcome)
    };
    Ok(CommandOutput::stdout(stdout))
}

pub fn batch(
    config: &Config,
    input: &Path,
    out: Option<&Path>,
    json: bool,
) -> Result<CommandOutput, String> {
    let classifier = load_classifier(config)?;
    let stores = Stores::from_config(config);
    let mut state = stores.load()?;

    let result = classify_csv(
        config,
        input,
        out,
        &mut state,
        stores.ports(&classifier),
        &FilesystemCsvBatch,
        &FilesystemCsvBatch,
    )?;

    if json {
        let mut value = result.report.to_json();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "out".to_string(),
                out.map(|p| serde_json::Value::from(p.display().to_string()))
                    .unwrap_or(serde_json::Value::Null),
            );
            let labels: Vec<serde_json::Value> = result
                .report
                .labels
                .iter()
                .map(|label| {
                    label
                        .map(|l| serde_json::Value::from(l.as_str()))
                        .unwrap_or(serde_json::Value::Null)
                })
                .collect();
            obj.insert("labels".to_string(), serde_json::Value::from(labels));
        }
        return Ok(CommandOutput::stdout(json_line(&value)?));
    }

    let summary = render::batch_summary(&result.report);
    match out {
        Some(out) => Ok(CommandOutput::stdout(format!(
            "{summary}\nwrote {}",
            out.display()
        ))),
        None => {
            let mut buf = Vec::new();
            write_table(&mut buf, &result.table)?;
            let table = String::from_utf8(buf)
                .map_err(|err| format!("labelled table is not UTF-8: {err}"))?;
            Ok(CommandOutput {
                stdout: table.trim_end_matches('\n').to_string(),
                notice: Some(summary),
            })
        }
    }
}

pub fn stats(config: &Config, json: bool) -> Result<CommandOutput, String> {
    let _classifier = load_classifier(config)?;
    let stores = Stores::from_config(config);
    let state = stores.load()?;
    let report = sentiment_stats(&state);

    let stdout = if json {
        json_line(&report.to_json()?)?
    } else {
        render::stats_text(&report).trim_end_matches('\n').to_string()
    };
    Ok(CommandOutput::stdout(stdout))
}

pub fn info(config: &Config, json: bool) -> Result<CommandOutput, String> {
    let classifier = load_classifier(config)?;
    let stores = Stores::from_config(config);
    let state = stores.load()?;
    let report = sentiment_stats(&state);

    let label_store = stores.label_store.path().display().to_string();
    let result_cache = stores.result_cache.path().display().to_string();
    let effective_config = to_toml_pretty(config)?;
    let stdout = if json {
        json_line(&serde_json::json!({
            "model": classifier.info(),
            "label_store": label_store,
            "result_cache": result_cache,
            "classified_total": state.counts.total(),
            "cache_entries": report.cache_entries,
            "config": effective_config,
        }))?
    } else {
        let mut text =
            render::model_info_text(classifier.info(), &report, &label_store, &result_cache);
        text.push_str("\neffective config:\n");
        text.push_str(&effective_config);
        text.trim_end_matches('\n').to_string()
    };
    Ok(CommandOutput::stdout(stdout))
}
