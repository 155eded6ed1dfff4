pub mod batch_csv;
pub mod classifier;
pub mod persistence;
