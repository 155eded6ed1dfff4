pub mod batch_table;
pub mod processed_dataset;
pub mod sentiment_counts;
