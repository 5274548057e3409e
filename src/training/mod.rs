//! Model training
//!
//! Seeded split, least squares fit, and held-out metrics.

pub mod metrics;
pub mod trainer;

pub use metrics::RegressionMetrics;
pub use trainer::{Trainer, TrainingOutcome};
