pub mod classification;
pub mod statistics;
