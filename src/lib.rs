//! House price estimation
//!
//! An ordinary least squares model over bedrooms, bathrooms and living area,
//! trained from a CSV dataset and served through a small web form.

pub mod data;
pub mod features;
pub mod model;
pub mod predict;
pub mod training;
pub mod web;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Feature columns, in the order the model consumes them
pub const FEATURE_NAMES: [&str; 3] = ["bedrooms", "bathrooms", "sqft_living"];

/// Target column
pub const TARGET_NAME: &str = "price";

/// A single row of the training dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseRecord {
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub sqft_living: f64,
    pub price: f64,
}

impl HouseRecord {
    /// Feature values in model order
    pub fn features(&self) -> [f64; 3] {
        [self.bedrooms, self.bathrooms, self.sqft_living]
    }

    /// Name of the first non-finite field, if any
    pub fn non_finite_field(&self) -> Option<&'static str> {
        let values = [self.bedrooms, self.bathrooms, self.sqft_living, self.price];
        let names = [FEATURE_NAMES[0], FEATURE_NAMES[1], FEATURE_NAMES[2], TARGET_NAME];
        values
            .iter()
            .zip(names)
            .find(|(v, _)| !v.is_finite())
            .map(|(_, name)| name)
    }
}

/// Features supplied for a single estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureVector {
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub sqft_living: u32,
}

impl FeatureVector {
    pub fn new(bedrooms: u32, bathrooms: u32, sqft_living: u32) -> Self {
        FeatureVector {
            bedrooms,
            bathrooms,
            sqft_living,
        }
    }

    /// Feature values in model order
    pub fn to_array(&self) -> [f64; 3] {
        [
            self.bedrooms as f64,
            self.bathrooms as f64,
            self.sqft_living as f64,
        ]
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bed / {} bath / {} sqft",
            self.bedrooms, self.bathrooms, self.sqft_living
        )
    }
}

/// Model prediction output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub features: FeatureVector,
    pub predicted_price: f64,
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum HouseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset is missing required column: {0}")]
    MissingColumn(String),

    #[error("Malformed record on line {line}: {message}")]
    MalformedRecord { line: u64, message: String },

    #[error("Insufficient data: have {rows} rows, need at least {required}")]
    InsufficientData { rows: usize, required: usize },

    #[error("Training data is degenerate: features are linearly dependent")]
    SingularDesign,

    #[error("No model artifact at {0} - run `houseprice train` first")]
    NoModel(String),

    #[error("Incompatible model artifact: {0}")]
    Artifact(String),

    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HouseError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub training: TrainingConfig,
    pub data: DataConfig,
    pub server: ServerConfig,
    pub limits: InputLimits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Share of rows held out for evaluation
    pub test_fraction: f64,
    pub seed: u64,
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.test_fraction) {
            return Err(HouseError::Config(format!(
                "training.test_fraction must be in [0, 1), got {}",
                self.test_fraction
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub dataset_path: String,
    pub model_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Accepted ranges for user-supplied features (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLimits {
    pub max_bedrooms: u32,
    pub max_bathrooms: u32,
    pub min_sqft_living: u32,
    pub max_sqft_living: u32,
}

impl Default for InputLimits {
    fn default() -> Self {
        InputLimits {
            max_bedrooms: 50,
            max_bathrooms: 50,
            min_sqft_living: 1,
            max_sqft_living: 100_000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            training: TrainingConfig {
                test_fraction: 0.2,
                seed: 42,
            },
            data: DataConfig {
                dataset_path: "data.csv".to_string(),
                model_path: "model/house_price_model.json".to_string(),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            limits: InputLimits::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HouseError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| HouseError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HouseError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the trainer or validator cannot work with
    pub fn validate(&self) -> Result<()> {
        self.training.validate()?;
        if self.limits.min_sqft_living > self.limits.max_sqft_living {
            return Err(HouseError::Config(format!(
                "limits.min_sqft_living ({}) exceeds limits.max_sqft_living ({})",
                self.limits.min_sqft_living, self.limits.max_sqft_living
            )));
        }
        Ok(())
    }
}
