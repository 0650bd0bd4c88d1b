//! # SolverOptions
//!
//! The `SolverOptions` struct holds the configuration of a solver run: the target
//! population size, the termination limits, the variation probabilities, the
//! logging level and the threshold above which evaluation runs in parallel.
//!
//! ## Example
//!
//! ```rust
//! use evogen::evolution::options::{LogLevel, SolverOptions};
//!
//! // Create a new SolverOptions instance with custom parameters
//! let custom_options = SolverOptions::new(50, 20, 200, 0.9, 0.1);
//! assert!(custom_options.validate().is_ok());
//!
//! // Create a new SolverOptions instance with default parameters
//! let default_options = SolverOptions::default();
//! assert_eq!(default_options.get_population_size(), 100);
//! ```
//!
//! ## Fields
//!
//! - `population_size`: Number of members kept by selection each generation.
//! - `max_fail_times`: Stagnation limit; zero or negative disables the check.
//! - `max_generations`: Hard generation limit.
//! - `crossover_prob`: Probability that a non-elite member joins crossover.
//! - `mutate_prob`: Probability that a non-elite member is mutated.
//! - `log_level`: How much the solver reports through `tracing`.
//! - `parallel_threshold`: Minimum number of stale members to evaluate in parallel.

use crate::error::{GeneticError, Result};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// A summary event per generation plus a debug event per member.
    Verbose,
    /// A summary event per generation.
    Minimal,
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOptions {
    population_size: usize,
    max_fail_times: i64,
    max_generations: usize,
    crossover_prob: f64,
    mutate_prob: f64,
    log_level: LogLevel,
    /// Minimum number of stale members to evaluate in parallel
    parallel_threshold: usize,
}

pub const DEFAULT_POPULATION_SIZE: usize = 100;
pub const DEFAULT_MAX_FAIL_TIMES: i64 = 50;
pub const DEFAULT_MAX_GENERATIONS: usize = 300;
pub const DEFAULT_CROSSOVER_PROB: f64 = 0.8;
pub const DEFAULT_MUTATE_PROB: f64 = 0.05;
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

impl SolverOptions {
    pub fn new(
        population_size: usize,
        max_fail_times: i64,
        max_generations: usize,
        crossover_prob: f64,
        mutate_prob: f64,
    ) -> Self {
        Self {
            population_size,
            max_fail_times,
            max_generations,
            crossover_prob,
            mutate_prob,
            log_level: LogLevel::None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Checks every option and reports the first violation as a configuration error.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if self.max_generations == 0 {
            return Err(GeneticError::Configuration(
                "Maximum number of generations cannot be zero".to_string(),
            ));
        }

        check_probability("Crossover probability", self.crossover_prob)?;
        check_probability("Mutation probability", self.mutate_prob)?;

        Ok(())
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_max_fail_times(&self) -> i64 {
        self.max_fail_times
    }

    pub fn get_max_generations(&self) -> usize {
        self.max_generations
    }

    pub fn get_crossover_prob(&self) -> f64 {
        self.crossover_prob
    }

    pub fn get_mutate_prob(&self) -> f64 {
        self.mutate_prob
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }

    /// Returns the minimum number of stale members evaluated in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Returns the stagnation limit, or `None` when the check is disabled.
    pub fn stagnation_limit(&self) -> Option<usize> {
        usize::try_from(self.max_fail_times)
            .ok()
            .filter(|limit| *limit > 0)
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_max_fail_times(&mut self, max_fail_times: i64) {
        self.max_fail_times = max_fail_times;
    }

    pub fn set_max_generations(&mut self, max_generations: usize) {
        self.max_generations = max_generations;
    }

    pub fn set_crossover_prob(&mut self, crossover_prob: f64) {
        self.crossover_prob = crossover_prob;
    }

    pub fn set_mutate_prob(&mut self, mutate_prob: f64) {
        self.mutate_prob = mutate_prob;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Returns a builder for creating a `SolverOptions` instance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evogen::evolution::options::{LogLevel, SolverOptions};
    ///
    /// let options = SolverOptions::builder()
    ///     .population_size(50)
    ///     .max_generations(200)
    ///     .max_fail_times(0)
    ///     .mutate_prob(0.2)
    ///     .log_level(LogLevel::Minimal)
    ///     .build();
    ///
    /// assert_eq!(options.stagnation_limit(), None);
    /// ```
    pub fn builder() -> SolverOptionsBuilder {
        SolverOptionsBuilder::default()
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GeneticError::Configuration(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            max_fail_times: DEFAULT_MAX_FAIL_TIMES,
            max_generations: DEFAULT_MAX_GENERATIONS,
            crossover_prob: DEFAULT_CROSSOVER_PROB,
            mutate_prob: DEFAULT_MUTATE_PROB,
            log_level: LogLevel::None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Builder for `SolverOptions`.
///
/// Unset fields fall back to the defaults of [`SolverOptions::default`].
#[derive(Debug, Clone, Default)]
pub struct SolverOptionsBuilder {
    population_size: Option<usize>,
    max_fail_times: Option<i64>,
    max_generations: Option<usize>,
    crossover_prob: Option<f64>,
    mutate_prob: Option<f64>,
    log_level: Option<LogLevel>,
    parallel_threshold: Option<usize>,
}

impl SolverOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn max_fail_times(mut self, value: i64) -> Self {
        self.max_fail_times = Some(value);
        self
    }

    pub fn max_generations(mut self, value: usize) -> Self {
        self.max_generations = Some(value);
        self
    }

    pub fn crossover_prob(mut self, value: f64) -> Self {
        self.crossover_prob = Some(value);
        self
    }

    pub fn mutate_prob(mut self, value: f64) -> Self {
        self.mutate_prob = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `SolverOptions` instance. Validation happens when a solver
    /// is constructed from it.
    pub fn build(self) -> SolverOptions {
        SolverOptions {
            population_size: self.population_size.unwrap_or(DEFAULT_POPULATION_SIZE),
            max_fail_times: self.max_fail_times.unwrap_or(DEFAULT_MAX_FAIL_TIMES),
            max_generations: self.max_generations.unwrap_or(DEFAULT_MAX_GENERATIONS),
            crossover_prob: self.crossover_prob.unwrap_or(DEFAULT_CROSSOVER_PROB),
            mutate_prob: self.mutate_prob.unwrap_or(DEFAULT_MUTATE_PROB),
            log_level: self.log_level.unwrap_or(LogLevel::None),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
        }
    }
}
