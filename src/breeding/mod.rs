//! # Breeding
//!
//! Variation operators applied between selection and the next evaluation.
pub mod variation;

pub use variation::{Variation, VariationReport};
