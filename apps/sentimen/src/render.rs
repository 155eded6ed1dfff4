use sentimen_application::pipeline::{BatchReport, SubmitOutcome};
use sentimen_application::reporting::StatsReport;
use sentimen_domain::services::statistics::StatsView;
use sentimen_domain::value_objects::label::SentimentLabel;
use sentimen_infrastructure::classifier::ModelInfo;
use std::fmt::Write as _;

const BAR_WIDTH: usize = 30;

pub fn banner(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "[+] POSITIVE",
        SentimentLabel::Neutral => "[=] NEUTRAL",
        SentimentLabel::Negative => "[-] NEGATIVE",
    }
}

pub fn submit_text(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Empty => "warning: no text given; nothing was classified".to_string(),
        SubmitOutcome::Classified { label, cached } => {
            let mut out = format!("{}  {label}", banner(*label));
            if *cached {
                out.push_str("  (cached)");
            }
            out
        }
    }
}

pub fn submit_json(outcome: &SubmitOutcome) -> serde_json::Value {
    match outcome {
        SubmitOutcome::Empty => serde_json::json!({ "status": "empty" }),
        SubmitOutcome::Classified { label, cached } => serde_json::json!({
            "status": "classified",
            "label": label.as_str(),
            "cached": cached,
        }),
    }
}

/// Filled portion of a proportion bar, rounded to the nearest cell.
pub fn share_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let mut bar = "#".repeat(filled);
    bar.push_str(&".".repeat(width - filled));
    bar
}

pub fn stats_text(report: &StatsReport) -> String {
    let mut out = String::new();
    match &report.view {
        StatsView::NoData => {
            out.push_str("no data yet: classify some text first\n");
        }
        StatsView::Distribution { total, shares } => {
            out.push_str("sentiment distribution\n");
            for share in shares {
                let _ = writeln!(
                    out,
                    "  {:<8} {} {:>5.1}%  {}",
                    share.label.as_str(),
                    share_bar(share.percent, BAR_WIDTH),
                    share.percent,
                    share.count
                );
            }
            let _ = writeln!(out, "  total    {total}");
        }
    }
    let _ = writeln!(out, "cached texts: {}", report.cache_entries);
    out
}

pub fn batch_summary(report: &BatchReport) -> String {
    let mut out = format!(
        "rows: {}  classified: {}  cache hits: {}  skipped: {}",
        report.rows(),
        report.classified,
        report.cache_hits,
        report.skipped_rows.len()
    );
    if !report.skipped_rows.is_empty() {
        let rows: Vec<String> = report
            .skipped_rows
            .iter()
            .map(|idx| (idx + 1).to_string())
            .collect();
        let _ = write!(out, "\nwarning: empty text in row(s) {}", rows.join(", "));
    }
    out
}

pub fn model_info_text(info: &ModelInfo, report: &StatsReport, label_store: &str, result_cache: &str) -> String {
    let classes: Vec<&str> = info.classes.iter().map(|c| c.as_str()).collect();
    let total = match &report.view {
        StatsView::NoData => 0,
        StatsView::Distribution { total, .. } => *total,
    };
    let mut out = String::new();
    let _ = writeln!(out, "vectorizer:   {}", info.vectorizer_path.display());
    let _ = writeln!(out, "  sha256:     {}", info.vectorizer_sha256);
    let _ = writeln!(out, "  vocabulary: {}", info.vocabulary_size);
    let _ = writeln!(out, "classifier:   {}", info.classifier_path.display());
    let _ = writeln!(out, "  sha256:     {}", info.classifier_sha256);
    let _ = writeln!(out, "  classes:    {}", classes.join(", "));
    let _ = writeln!(out, "label store:  {label_store} ({total} classified)");
    let _ = writeln!(out, "result cache: {result_cache} ({} entries)", report.cache_entries);
    out
}
