//! Input validation between the request boundary and the model
//!
//! Raw strings from a form or command line become a `FeatureVector` only
//! after an integer parse and a range check against `InputLimits`.

use serde::{Deserialize, Serialize};

use crate::{FeatureVector, HouseError, InputLimits, Result};

/// Unparsed feature fields as submitted by a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFeatures {
    pub bedrooms: String,
    pub bathrooms: String,
    pub sqft_living: String,
}

impl RawFeatures {
    pub fn new(bedrooms: &str, bathrooms: &str, sqft_living: &str) -> Self {
        RawFeatures {
            bedrooms: bedrooms.to_string(),
            bathrooms: bathrooms.to_string(),
            sqft_living: sqft_living.to_string(),
        }
    }

    /// Parse and range-check every field
    pub fn validate(&self, limits: &InputLimits) -> Result<FeatureVector> {
        let features = FeatureVector {
            bedrooms: parse_count("bedrooms", &self.bedrooms)?,
            bathrooms: parse_count("bathrooms", &self.bathrooms)?,
            sqft_living: parse_count("sqft_living", &self.sqft_living)?,
        };
        check_ranges(&features, limits)?;
        Ok(features)
    }
}

/// Range-check an already typed feature vector
pub fn check_ranges(features: &FeatureVector, limits: &InputLimits) -> Result<()> {
    check_range("bedrooms", features.bedrooms, 0, limits.max_bedrooms)?;
    check_range("bathrooms", features.bathrooms, 0, limits.max_bathrooms)?;
    check_range(
        "sqft_living",
        features.sqft_living,
        limits.min_sqft_living,
        limits.max_sqft_living,
    )
}

fn parse_count(field: &str, raw: &str) -> Result<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(invalid(field, "a value is required".to_string()));
    }
    raw.parse::<u32>().map_err(|_| {
        invalid(
            field,
            format!("expected a non-negative whole number, got {:?}", raw),
        )
    })
}

fn check_range(field: &str, value: u32, min: u32, max: u32) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field,
            format!("{} is outside the accepted range {}..={}", value, min, max),
        ));
    }
    Ok(())
}

fn invalid(field: &str, message: String) -> HouseError {
    HouseError::InvalidInput {
        field: field.to_string(),
        message,
    }
}
