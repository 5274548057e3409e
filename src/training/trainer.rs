//! Fit and evaluate the price model

use crate::data::HouseDataset;
use crate::model::{LinearRegression, ModelArtifact};
use crate::training::metrics::RegressionMetrics;
use crate::{Result, TrainingConfig};

/// Result of a training run
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub model: LinearRegression,
    pub training_rows: usize,
    pub test_rows: usize,
    /// Metrics on the held-out split, `None` when nothing was held out
    pub evaluation: Option<RegressionMetrics>,
}

/// Trainer for the linear price model
pub struct Trainer {
    test_fraction: f64,
    seed: u64,
}

impl Trainer {
    pub fn new(config: &TrainingConfig) -> Self {
        Trainer {
            test_fraction: config.test_fraction,
            seed: config.seed,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    /// Split, fit on the training rows and score the held-out rows
    pub fn train(&self, dataset: &HouseDataset) -> Result<TrainingOutcome> {
        let split = dataset.train_test_split(self.test_fraction, self.seed)?;

        let model = LinearRegression::fit(&split.train.features(), &split.train.targets())?;
        log::info!(
            "Fitted model: intercept={:.2}, bedrooms={:.2}, bathrooms={:.2}, sqft_living={:.4}",
            model.intercept,
            model.coefficients[0],
            model.coefficients[1],
            model.coefficients[2]
        );

        let predictions = model.predict_batch(&split.test.features());
        let evaluation = RegressionMetrics::compute(&predictions, &split.test.targets());
        match &evaluation {
            Some(metrics) => log::info!("Held-out evaluation: {}", metrics),
            None => log::warn!("No rows held out; skipping evaluation"),
        }

        Ok(TrainingOutcome {
            model,
            training_rows: split.train.len(),
            test_rows: split.test.len(),
            evaluation,
        })
    }

    /// Train and package the result as an artifact ready to save
    pub fn train_artifact(&self, dataset: &HouseDataset) -> Result<ModelArtifact> {
        let outcome = self.train(dataset)?;
        Ok(ModelArtifact::new(
            outcome.model,
            outcome.training_rows,
            outcome.test_rows,
            self.seed,
            self.test_fraction,
            outcome.evaluation,
        ))
    }
}
