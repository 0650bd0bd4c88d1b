//! # Error Types
//!
//! This module defines the error type shared by every stage of the engine.
//! Configuration problems are reported when a solver is built or when a
//! post-generation hook leaves the options in an invalid state; runtime
//! problems surface from evaluation and selection.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use evogen::error::{GeneticError, Result};
//!
//! fn check_size(size: usize) -> Result<usize> {
//!     if size == 0 {
//!         return Err(GeneticError::Configuration(
//!             "Population size cannot be zero".to_string(),
//!         ));
//!     }
//!     Ok(size)
//! }
//!
//! assert!(check_size(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use evogen::error::{GeneticError, OptionExt};
//!
//! fn find_best_candidate(candidates: &[i32]) -> evogen::error::Result<i32> {
//!     candidates.iter().max().cloned().ok_or_else_genetic(||
//!         GeneticError::EmptyPopulation
//!     )
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or running an evolution.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// An invalid option value, a missing operator or a missing builder part.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a fitness calculation yields an unusable value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Objective vectors of different lengths met in the same population.
    #[error("Dimension mismatch: expected {expected} objectives, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Error that occurs when the evolution loop reaches an inconsistent state.
    #[error("Evolution error: {0}")]
    Evolution(String),
}

/// A specialized Result type for evolution operations.
///
/// ## Examples
///
/// ```rust
/// use evogen::error::Result;
///
/// fn may_fail() -> Result<i32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
