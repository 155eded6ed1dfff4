use sentimen_domain::entities::processed_dataset::ProcessedDataset;
use sentimen_domain::entities::sentiment_counts::SentimentCounts;
use sentimen_domain::repositories::batch_io::{BatchQuery, BatchReader, BatchWriter};
use sentimen_domain::repositories::classifier::Classifier;
use sentimen_domain::repositories::label_store::LabelStore;
use sentimen_domain::repositories::result_cache::ResultCacheRepository;
use sentimen_domain::value_objects::label::SentimentLabel;
use sentimen_infrastructure::batch_csv::FilesystemCsvBatch;
use sentimen_infrastructure::classifier::LinearTfidfClassifier;
use sentimen_infrastructure::persistence::label_store::JsonLabelStore;
use sentimen_infrastructure::persistence::result_cache::JsonResultCache;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_tmp_dir(name: &str) -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir().join(format!("sentimen_it_{name}_{}_{}", std::process::id(), now));
    fs::create_dir_all(&dir).expect("create dir");
    dir
}

#[test]
fn stores_share_a_directory_without_interfering() {
    let dir = unique_tmp_dir("stores");
    let counts_store = JsonLabelStore::new(dir.join("sentiment_data.json"));
    let cache = JsonResultCache::new(dir.join("processed_dataset.json"));

    let mut counts = SentimentCounts::default();
    counts.increment(SentimentLabel::Negative);
    let mut dataset = ProcessedDataset::new();
    dataset.insert("pelayanan lambat", SentimentLabel::Negative);

    cache.save(&dataset).expect("save cache");
    counts_store.save(&counts).expect("save counts");

    assert_eq!(counts_store.load().expect("counts"), counts);
    assert_eq!(cache.load().expect("cache"), dataset);
}

#[test]
fn csv_batch_through_real_classifier() {
    let dir = unique_tmp_dir("pipeline");
    let vectorizer = dir.join("tfidf_vectorizer.json");
    let model = dir.join("svm_sentiment_model.json");
    fs::write(
        &vectorizer,
        r#"{"vocabulary": {"puas": 0, "kecewa": 1}, "idf": [1.0, 1.0]}"#,
    )
    .expect("vectorizer");
    fs::write(
        &model,
        r#"{"classes": ["negatif", "netral", "positif"],
            "coef": [[-1.0, 1.0], [0.0, 0.0], [1.0, -1.0]],
            "intercept": [0.0, 0.05, 0.0]}"#,
    )
    .expect("model");
    let classifier = LinearTfidfClassifier::load(&vectorizer, &model).expect("classifier");

    let input = dir.join("reviews.csv");
    fs::write(&input, "text\nsangat puas\nkecewa berat\nbiasa\n").expect("csv");
    let table = FilesystemCsvBatch
        .read_batch(&BatchQuery {
            path: &input,
            text_column: "text",
            label_column: "label",
        })
        .expect("read");

    let labels: Vec<Option<SentimentLabel>> = table
        .texts()
        .into_iter()
        .map(|text| Some(classifier.classify(text)))
        .collect();
    let labelled = table.with_labels("label", &labels).expect("labelled");
    let out = dir.join("labelled.csv");
    FilesystemCsvBatch.write_batch(&out, &labelled).expect("write");

    assert_eq!(
        fs::read_to_string(&out).expect("read"),
        "text,label\nsangat puas,positif\nkecewa berat,negatif\nbiasa,netral\n"
    );
}
