//! Data ingestion
//!
//! CSV loading and train/test splitting.

pub mod dataset;

pub use dataset::{DatasetSplit, HouseDataset};
