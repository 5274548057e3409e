//! Prediction and inference
//!
//! Load trained models and generate price estimates.

pub mod inference;

pub use inference::{estimate_price, format_prediction, format_price, Predictor};
