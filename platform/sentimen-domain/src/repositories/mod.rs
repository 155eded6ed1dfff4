pub mod batch_io;
pub mod classifier;
pub mod label_store;
pub mod result_cache;
