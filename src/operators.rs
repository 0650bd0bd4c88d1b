//! # Operators
//!
//! The `Operators` trait is the problem-specific half of an evolution: it creates
//! fresh values, scores them, recombines pairs and mutates single values. The
//! engine never looks inside a value; everything it knows comes through these
//! four methods plus an optional hook that runs once per generation.
//!
//! Implement the trait on your own type when the operators share state, or use
//! [`OperatorSet`] to assemble them from closures around a parameter block.
//!
//! ## Example
//!
//! ```rust
//! use evogen::operators::Operators;
//! use evogen::rng::RandomNumberGenerator;
//!
//! #[derive(Debug)]
//! struct Parabola {
//!     target: f64,
//! }
//!
//! impl Operators for Parabola {
//!     type Value = f64;
//!     type Fitness = f64;
//!
//!     fn initialize(&self, rng: &mut RandomNumberGenerator) -> f64 {
//!         rng.gen_range(0.0..10.0)
//!     }
//!
//!     fn evaluate(&self, value: &f64) -> f64 {
//!         (value - self.target).powi(2)
//!     }
//!
//!     fn crossover(&self, a: &f64, b: &f64, rng: &mut RandomNumberGenerator) -> (f64, f64) {
//!         let t: f64 = rng.gen_range(0.0..1.0);
//!         (t * a + (1.0 - t) * b, (1.0 - t) * a + t * b)
//!     }
//!
//!     fn mutate(&self, value: &mut f64, rng: &mut RandomNumberGenerator) {
//!         *value += rng.gen_range(-0.5..0.5);
//!     }
//! }
//! ```

use std::fmt;

use crate::error::{GeneticError, Result};
use crate::evolution::options::SolverOptions;
use crate::individual::Fitness;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// Progress counters handed to the post-generation hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationInfo {
    pub generation: usize,
    pub stagnation_count: usize,
}

/// Problem-specific operators driving an evolution.
///
/// `evaluate` must be free of side effects: it may run on several threads at once
/// when the population is large enough.
pub trait Operators: Send + Sync {
    type Value: Clone + fmt::Debug + Send + Sync;
    type Fitness: Fitness;

    /// Produces a fresh value for the initial population.
    fn initialize(&self, rng: &mut RandomNumberGenerator) -> Self::Value;

    /// Scores a value.
    fn evaluate(&self, value: &Self::Value) -> Self::Fitness;

    /// Recombines two parents into two children.
    fn crossover(
        &self,
        parent_a: &Self::Value,
        parent_b: &Self::Value,
        rng: &mut RandomNumberGenerator,
    ) -> (Self::Value, Self::Value);

    /// Changes a value in place.
    fn mutate(&self, value: &mut Self::Value, rng: &mut RandomNumberGenerator);

    /// Runs once per generation after selection and before variation.
    ///
    /// The hook may adapt its own state or the options (e.g. mutation rates);
    /// it only sees the population through a shared reference.
    fn after_selection(
        &mut self,
        _population: &Population<Self::Value, Self::Fitness>,
        _info: &GenerationInfo,
        _options: &mut SolverOptions,
    ) {
    }
}

type InitializeFn<V, P> = Box<dyn Fn(&P, &mut RandomNumberGenerator) -> V + Send + Sync>;
type EvaluateFn<V, F, P> = Box<dyn Fn(&V, &P) -> F + Send + Sync>;
type CrossoverFn<V, P> =
    Box<dyn Fn(&V, &V, &P, &mut RandomNumberGenerator) -> (V, V) + Send + Sync>;
type MutateFn<V, P> = Box<dyn Fn(&mut V, &P, &mut RandomNumberGenerator) + Send + Sync>;
type HookFn<V, F, P> =
    Box<dyn FnMut(&mut P, &Population<V, F>, &GenerationInfo, &mut SolverOptions) + Send + Sync>;

/// Operators assembled from closures that share a parameter block `P`.
///
/// The evaluation, crossover and mutation closures read the block; the optional
/// hook may change it between generations.
///
/// ```rust
/// use evogen::operators::OperatorSet;
///
/// let operators = OperatorSet::<f64, f64, f64>::builder(3.0)
///     .initialize(|_, rng| rng.gen_range(0.0..10.0))
///     .evaluate(|x, target| (x - target).powi(2))
///     .crossover(|a, b, _, _| ((a + b) / 2.0, (a + b) / 2.0))
///     .mutate(|x, _, rng| *x += rng.gen_range(-0.1..0.1))
///     .build()
///     .unwrap();
///
/// assert_eq!(*operators.params(), 3.0);
/// ```
pub struct OperatorSet<V, F, P> {
    params: P,
    initialize: InitializeFn<V, P>,
    evaluate: EvaluateFn<V, F, P>,
    crossover: CrossoverFn<V, P>,
    mutate: MutateFn<V, P>,
    hook: Option<HookFn<V, F, P>>,
}

impl<V, F, P> OperatorSet<V, F, P> {
    pub fn builder(params: P) -> OperatorSetBuilder<V, F, P> {
        OperatorSetBuilder {
            params,
            initialize: None,
            evaluate: None,
            crossover: None,
            mutate: None,
            hook: None,
        }
    }

    pub fn params(&self) -> &P {
        &self.params
    }
}

impl<V, F, P: fmt::Debug> fmt::Debug for OperatorSet<V, F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorSet")
            .field("params", &self.params)
            .field("has_hook", &self.hook.is_some())
            .finish()
    }
}

impl<V, F, P> Operators for OperatorSet<V, F, P>
where
    V: Clone + fmt::Debug + Send + Sync,
    F: Fitness,
    P: Send + Sync,
{
    type Value = V;
    type Fitness = F;

    fn initialize(&self, rng: &mut RandomNumberGenerator) -> V {
        (self.initialize)(&self.params, rng)
    }

    fn evaluate(&self, value: &V) -> F {
        (self.evaluate)(value, &self.params)
    }

    fn crossover(&self, parent_a: &V, parent_b: &V, rng: &mut RandomNumberGenerator) -> (V, V) {
        (self.crossover)(parent_a, parent_b, &self.params, rng)
    }

    fn mutate(&self, value: &mut V, rng: &mut RandomNumberGenerator) {
        (self.mutate)(value, &self.params, rng)
    }

    fn after_selection(
        &mut self,
        population: &Population<V, F>,
        info: &GenerationInfo,
        options: &mut SolverOptions,
    ) {
        if let Some(hook) = self.hook.as_mut() {
            hook(&mut self.params, population, info, options);
        }
    }
}

/// Builder for [`OperatorSet`]. Every operator except the hook is required.
pub struct OperatorSetBuilder<V, F, P> {
    params: P,
    initialize: Option<InitializeFn<V, P>>,
    evaluate: Option<EvaluateFn<V, F, P>>,
    crossover: Option<CrossoverFn<V, P>>,
    mutate: Option<MutateFn<V, P>>,
    hook: Option<HookFn<V, F, P>>,
}

impl<V, F, P> OperatorSetBuilder<V, F, P> {
    pub fn initialize<I>(mut self, initialize: I) -> Self
    where
        I: Fn(&P, &mut RandomNumberGenerator) -> V + Send + Sync + 'static,
    {
        self.initialize = Some(Box::new(initialize));
        self
    }

    pub fn evaluate<E>(mut self, evaluate: E) -> Self
    where
        E: Fn(&V, &P) -> F + Send + Sync + 'static,
    {
        self.evaluate = Some(Box::new(evaluate));
        self
    }

    pub fn crossover<C>(mut self, crossover: C) -> Self
    where
        C: Fn(&V, &V, &P, &mut RandomNumberGenerator) -> (V, V) + Send + Sync + 'static,
    {
        self.crossover = Some(Box::new(crossover));
        self
    }

    pub fn mutate<M>(mut self, mutate: M) -> Self
    where
        M: Fn(&mut V, &P, &mut RandomNumberGenerator) + Send + Sync + 'static,
    {
        self.mutate = Some(Box::new(mutate));
        self
    }

    pub fn after_selection<H>(mut self, hook: H) -> Self
    where
        H: FnMut(&mut P, &Population<V, F>, &GenerationInfo, &mut SolverOptions)
            + Send
            + Sync
            + 'static,
    {
        self.hook = Some(Box::new(hook));
        self
    }

    pub fn build(self) -> Result<OperatorSet<V, F, P>> {
        let initialize = self.initialize.ok_or_else(|| {
            GeneticError::Configuration("Initialization operator not specified".to_string())
        })?;

        let evaluate = self.evaluate.ok_or_else(|| {
            GeneticError::Configuration("Evaluation operator not specified".to_string())
        })?;

        let crossover = self.crossover.ok_or_else(|| {
            GeneticError::Configuration("Crossover operator not specified".to_string())
        })?;

        let mutate = self.mutate.ok_or_else(|| {
            GeneticError::Configuration("Mutation operator not specified".to_string())
        })?;

        Ok(OperatorSet {
            params: self.params,
            initialize,
            evaluate,
            crossover,
            mutate,
            hook: self.hook,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> OperatorSetBuilder<f64, f64, f64> {
        OperatorSet::<f64, f64, f64>::builder(2.0)
            .initialize(|scale: &f64, rng: &mut RandomNumberGenerator| {
                let unit: f64 = rng.gen_range(0.0..1.0);
                unit * scale
            })
            .evaluate(|x: &f64, scale: &f64| x * scale)
            .crossover(|a: &f64, b: &f64, _: &f64, _: &mut RandomNumberGenerator| (*b, *a))
            .mutate(|x: &mut f64, scale: &f64, _: &mut RandomNumberGenerator| *x += scale)
    }

    #[test]
    fn test_complete_set_dispatches_to_closures() {
        let operators = complete_builder().build().unwrap();
        let mut rng = RandomNumberGenerator::from_seed(5);

        let value = operators.initialize(&mut rng);
        assert!((0.0..2.0).contains(&value));
        assert_eq!(operators.evaluate(&3.0), 6.0);
        assert_eq!(operators.crossover(&1.0, &4.0, &mut rng), (4.0, 1.0));

        let mut x = 1.0;
        operators.mutate(&mut x, &mut rng);
        assert_eq!(x, 3.0);
    }

    #[test]
    fn test_missing_operator_is_configuration_error() {
        let result = OperatorSet::<f64, f64, ()>::builder(())
            .initialize(|_: &(), _: &mut RandomNumberGenerator| 0.0)
            .evaluate(|x: &f64, _: &()| *x)
            .mutate(|_: &mut f64, _: &(), _: &mut RandomNumberGenerator| {})
            .build();

        match result {
            Err(GeneticError::Configuration(msg)) => {
                assert!(msg.contains("Crossover operator not specified"))
            }
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_hook_updates_params_and_options() {
        let mut operators = complete_builder()
            .after_selection(
                |scale: &mut f64,
                 _: &Population<f64, f64>,
                 info: &GenerationInfo,
                 options: &mut SolverOptions| {
                    *scale = info.generation as f64;
                    options.set_mutate_prob(0.5);
                },
            )
            .build()
            .unwrap();

        let population = Population::new();
        let mut options = SolverOptions::default();
        let info = GenerationInfo {
            generation: 7,
            stagnation_count: 0,
        };
        operators.after_selection(&population, &info, &mut options);

        assert_eq!(*operators.params(), 7.0);
        assert_eq!(options.get_mutate_prob(), 0.5);
    }

    #[test]
    fn test_absent_hook_is_noop() {
        let mut operators = complete_builder().build().unwrap();
        let mut options = SolverOptions::default();
        let info = GenerationInfo {
            generation: 1,
            stagnation_count: 0,
        };
        operators.after_selection(&Population::new(), &info, &mut options);

        assert_eq!(*operators.params(), 2.0);
        assert_eq!(options, SolverOptions::default());
    }
}
