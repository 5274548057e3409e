//! Feature input handling
//!
//! Turns user-supplied values into validated model inputs.

pub mod validation;

pub use validation::{check_ranges, RawFeatures};
