use crate::{
    error::{GeneticError, Result},
    operators::Operators,
    rng::RandomNumberGenerator,
    selection::SelectionStrategy,
};

use super::{options::SolverOptions, solver::Solver};

/// Fluent construction of a [`Solver`].
///
/// Operators and a selection strategy are required. Options default to
/// [`SolverOptions::default`] and the random stream to an entropy-seeded one.
///
/// ```
/// use evogen::evolution::SolverBuilder;
/// use evogen::operators::OperatorSet;
/// use evogen::selection::ElitistSelection;
///
/// let operators = OperatorSet::<f64, f64, ()>::builder(())
///     .initialize(|_, rng| rng.gen_range(-1.0..1.0))
///     .evaluate(|x, _| x * x)
///     .crossover(|a, b, _, _| (*b, *a))
///     .mutate(|x, _, rng| *x += rng.gen_range(-0.1..0.1))
///     .build()
///     .unwrap();
///
/// let solver = SolverBuilder::new()
///     .with_operators(operators)
///     .with_selection(ElitistSelection::default().with_lower_is_better())
///     .with_seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(solver.population().len(), 100);
/// ```
pub struct SolverBuilder<O, S>
where
    O: Operators,
    S: SelectionStrategy<O::Fitness>,
{
    options: Option<SolverOptions>,
    operators: Option<O>,
    selection: Option<S>,
    rng: Option<RandomNumberGenerator>,
}

impl<O, S> SolverBuilder<O, S>
where
    O: Operators,
    S: SelectionStrategy<O::Fitness>,
{
    pub fn new() -> Self {
        Self {
            options: None,
            operators: None,
            selection: None,
            rng: None,
        }
    }

    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_operators(mut self, operators: O) -> Self {
        self.operators = Some(operators);
        self
    }

    pub fn with_selection(mut self, selection: S) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Uses a seeded random stream, making the run reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(RandomNumberGenerator::from_seed(seed));
        self
    }

    /// Builds and initializes the solver.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if operators or selection are missing,
    /// or if the options are invalid.
    pub fn build(self) -> Result<Solver<O, S>> {
        let operators = self
            .operators
            .ok_or_else(|| GeneticError::Configuration("Operators not specified".to_string()))?;

        let selection = self.selection.ok_or_else(|| {
            GeneticError::Configuration("Selection strategy not specified".to_string())
        })?;

        Solver::new(
            self.options.unwrap_or_default(),
            operators,
            selection,
            self.rng.unwrap_or_default(),
        )
    }
}

impl<O, S> Default for SolverBuilder<O, S>
where
    O: Operators,
    S: SelectionStrategy<O::Fitness>,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::OperatorSet;
    use crate::selection::ElitistSelection;

    type Scalar = OperatorSet<f64, f64, ()>;

    fn operators() -> Scalar {
        Scalar::builder(())
            .initialize(|_: &(), rng: &mut RandomNumberGenerator| rng.gen_range(0.0..1.0))
            .evaluate(|x: &f64, _: &()| *x)
            .crossover(|a: &f64, b: &f64, _: &(), _: &mut RandomNumberGenerator| (*a, *b))
            .mutate(|_: &mut f64, _: &(), _: &mut RandomNumberGenerator| {})
            .build()
            .unwrap()
    }

    #[test]
    fn test_missing_operators() {
        let result = SolverBuilder::<Scalar, ElitistSelection>::new()
            .with_selection(ElitistSelection::default())
            .build();

        match result {
            Err(GeneticError::Configuration(msg)) => {
                assert!(msg.contains("Operators not specified"))
            }
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_missing_selection() {
        let result = SolverBuilder::<Scalar, ElitistSelection>::new()
            .with_operators(operators())
            .build();

        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_invalid_options_fail_at_build() {
        let result = SolverBuilder::new()
            .with_operators(operators())
            .with_selection(ElitistSelection::default())
            .with_options(SolverOptions::builder().mutate_prob(2.0).build())
            .build();

        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_seeded_builds_are_reproducible() {
        let build = || {
            SolverBuilder::new()
                .with_operators(operators())
                .with_selection(ElitistSelection::default())
                .with_options(
                    SolverOptions::builder()
                        .population_size(10)
                        .max_generations(20)
                        .build(),
                )
                .with_seed(9)
                .build()
                .unwrap()
        };

        let first = build().run().unwrap();
        let second = build().run().unwrap();
        assert_eq!(first.history, second.history);
        assert_eq!(first.value, second.value);
    }
}
