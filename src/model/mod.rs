//! Regression model and its on-disk artifact

pub mod artifact;
pub mod linear;

pub use artifact::ModelArtifact;
pub use linear::LinearRegression;
