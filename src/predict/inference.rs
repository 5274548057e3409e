//! Model inference for price estimates

use std::path::Path;

use crate::data::HouseDataset;
use crate::features::check_ranges;
use crate::model::ModelArtifact;
use crate::training::Trainer;
use crate::{Config, FeatureVector, InputLimits, Prediction, Result};

/// Predictor over a loaded, verified model artifact
#[derive(Debug, Clone)]
pub struct Predictor {
    artifact: ModelArtifact,
    limits: InputLimits,
}

impl Predictor {
    /// Create a predictor from an artifact, verifying its layout first
    pub fn new(artifact: ModelArtifact, limits: InputLimits) -> Result<Self> {
        artifact.verify()?;
        Ok(Predictor { artifact, limits })
    }

    /// Load predictor from a saved artifact
    pub fn load<P: AsRef<Path>>(model_path: P, limits: InputLimits) -> Result<Self> {
        let artifact = ModelArtifact::load(model_path)?;
        Self::new(artifact, limits)
    }

    /// Predict the price of a single house
    pub fn predict(&self, features: FeatureVector) -> Result<Prediction> {
        check_ranges(&features, &self.limits)?;
        let predicted_price = self.artifact.model.predict(&features.to_array());
        log::debug!("Predicted {:.2} for {}", predicted_price, features);
        Ok(Prediction {
            features,
            predicted_price,
        })
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    pub fn limits(&self) -> &InputLimits {
        &self.limits
    }
}

/// Train from the configured dataset and price one house, persisting nothing
pub fn estimate_price(config: &Config, features: FeatureVector) -> Result<Prediction> {
    let dataset = HouseDataset::load(&config.data.dataset_path)?;
    let artifact = Trainer::new(&config.training).train_artifact(&dataset)?;
    Predictor::new(artifact, config.limits)?.predict(features)
}

/// Format a prediction for display
pub fn format_prediction(pred: &Prediction) -> String {
    format!(
        r#"
┌─────────────────────────────────────────────────┐
│  Bedrooms:         {}
│  Bathrooms:        {}
│  Living area:      {} sqft
├─────────────────────────────────────────────────┤
│  Predicted price:  {}
└─────────────────────────────────────────────────┘
"#,
        pred.features.bedrooms,
        pred.features.bathrooms,
        pred.features.sqft_living,
        format_price(pred.predicted_price)
    )
}

/// Render a price with thousands separators, e.g. `$430,000.00`
pub fn format_price(price: f64) -> String {
    let sign = if price < 0.0 { "-" } else { "" };
    let cents = (price.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}
