//! # Individual
//!
//! An `Individual` is one candidate solution together with its cached fitness.
//! The cache is empty until the evaluation stage fills it, and any mutable
//! access to the value empties it again, so an unchanged individual is never
//! evaluated twice.
//!
//! ## Example
//!
//! ```rust
//! use evogen::individual::Individual;
//!
//! let mut individual: Individual<f64, f64> = Individual::new(1.5);
//! assert!(!individual.is_evaluated());
//!
//! individual.set_fitness(2.25);
//! assert_eq!(individual.fitness(), Some(&2.25));
//!
//! *individual.value_mut() += 1.0;
//! assert!(!individual.is_evaluated());
//! ```

use std::fmt::Debug;

/// Trait for fitness values produced by the evaluation operator.
///
/// Implemented for `f64` (single objective) and `Vec<f64>` (one entry per objective).
pub trait Fitness: Clone + Debug + Send + Sync {
    /// Returns `true` when every component is a finite number.
    fn is_finite(&self) -> bool;
}

impl Fitness for f64 {
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

impl Fitness for Vec<f64> {
    fn is_finite(&self) -> bool {
        self.iter().all(|objective| objective.is_finite())
    }
}

/// One candidate solution plus its cached fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<V, F> {
    value: V,
    fitness: Option<F>,
}

impl<V, F> Individual<V, F> {
    /// Creates an individual whose fitness still has to be computed.
    pub fn new(value: V) -> Self {
        Self {
            value,
            fitness: None,
        }
    }

    /// Creates an individual with an already known fitness.
    pub fn with_fitness(value: V, fitness: F) -> Self {
        Self {
            value,
            fitness: Some(fitness),
        }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the value for in-place modification and invalidates the cached fitness.
    pub fn value_mut(&mut self) -> &mut V {
        self.fitness = None;
        &mut self.value
    }

    /// The cached fitness, `None` while the individual needs re-evaluation.
    pub fn fitness(&self) -> Option<&F> {
        self.fitness.as_ref()
    }

    pub fn set_fitness(&mut self, fitness: F) {
        self.fitness = Some(fitness);
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Marks the individual as stale.
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    pub fn into_parts(self) -> (V, Option<F>) {
        (self.value, self.fitness)
    }
}
