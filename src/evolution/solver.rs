use super::{
    evaluation::evaluate_population,
    options::{LogLevel, SolverOptions},
};
use crate::{
    breeding::Variation,
    error::{GeneticError, OptionExt, Result},
    individual::Individual,
    operators::{GenerationInfo, Operators},
    population::{IndividualId, Population},
    rng::RandomNumberGenerator,
    selection::{Dominance, ParetoSelection, SelectionStrategy},
};

/// Everything a finished run exposes.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult<V, F> {
    /// The elite value.
    pub value: V,
    /// The elite fitness.
    pub fitness: F,
    /// Every evaluated member of the final population.
    pub population: Vec<(V, F)>,
    /// Elite fitness recorded after each generation's selection.
    pub history: Vec<F>,
    /// Number of generations executed.
    pub generations: usize,
    /// Stagnation counter at termination.
    pub stagnation_count: usize,
}

/// Drives the generational loop: evaluate, select, record, check termination, vary.
///
/// The solver owns the population for the whole run. Each call to [`Solver::step`]
/// runs one generation; [`Solver::run`] steps until a termination condition holds:
///
/// - the generation counter exceeds `max_generations`, or
/// - `max_fail_times` is positive and the stagnation counter exceeds it.
///
/// Both conditions are checked after selection and before variation, so `run`
/// performs at most `max_generations + 1` evaluate/select cycles.
#[derive(Debug)]
pub struct Solver<O, S>
where
    O: Operators,
    S: SelectionStrategy<O::Fitness>,
{
    options: SolverOptions,
    operators: O,
    selection: S,
    rng: RandomNumberGenerator,
    population: Population<O::Value, O::Fitness>,
    elite: Option<IndividualId>,
    history: Vec<O::Fitness>,
    generation: usize,
    stagnation_count: usize,
    terminated: bool,
}

impl<O, S> Solver<O, S>
where
    O: Operators,
    S: SelectionStrategy<O::Fitness>,
{
    /// Creates a solver and seeds its initial population.
    ///
    /// # Arguments
    ///
    /// * `options` - Population size, termination limits and variation rates.
    /// * `operators` - The problem-specific operators.
    /// * `selection` - The survivor selection strategy.
    /// * `rng` - The random stream used for seeding and variation.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if the options are invalid.
    pub fn new(
        options: SolverOptions,
        operators: O,
        selection: S,
        rng: RandomNumberGenerator,
    ) -> Result<Self> {
        let mut solver = Self {
            options,
            operators,
            selection,
            rng,
            population: Population::new(),
            elite: None,
            history: Vec::new(),
            generation: 0,
            stagnation_count: 0,
            terminated: false,
        };
        solver.initialize()?;
        Ok(solver)
    }

    /// Seeds a fresh population of `population_size` members and resets every counter.
    pub fn initialize(&mut self) -> Result<()> {
        self.options.validate()?;

        self.population.clear();
        for _ in 0..self.options.get_population_size() {
            let value = self.operators.initialize(&mut self.rng);
            self.population.insert(Individual::new(value));
        }

        self.elite = None;
        self.history.clear();
        self.generation = 0;
        self.stagnation_count = 0;
        self.terminated = false;

        tracing::debug!(
            population_size = self.options.get_population_size(),
            "population seeded"
        );
        Ok(())
    }

    /// Runs one generation. Returns `true` once the run has terminated; calling
    /// `step` after that does nothing.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - An evaluation produces a non-finite fitness
    /// - Selection fails (empty population, inconsistent fitness values)
    /// - The post-generation hook leaves the options invalid
    pub fn step(&mut self) -> Result<bool> {
        if self.terminated {
            return Ok(true);
        }

        self.generation += 1;

        let evaluated = evaluate_population(
            &mut self.population,
            &self.operators,
            self.options.get_parallel_threshold(),
        )?;

        let outcome = self.selection.select(
            &mut self.population,
            self.options.get_population_size(),
            self.elite,
        )?;

        if outcome.improved {
            self.stagnation_count = 0;
        } else {
            self.stagnation_count += 1;
        }
        self.elite = Some(outcome.elite);

        let elite_fitness = self
            .elite_individual()?
            .fitness()
            .cloned()
            .ok_or_else_genetic(|| {
                GeneticError::Evolution(format!(
                    "Elite {} has no fitness in generation {}",
                    outcome.elite, self.generation
                ))
            })?;
        self.history.push(elite_fitness);

        self.log_generation(evaluated);

        let info = GenerationInfo {
            generation: self.generation,
            stagnation_count: self.stagnation_count,
        };
        self.operators
            .after_selection(&self.population, &info, &mut self.options);
        self.options.validate()?;

        if self.should_terminate() {
            self.terminated = true;
            tracing::debug!(
                generation = self.generation,
                stagnation = self.stagnation_count,
                "evolution terminated"
            );
            return Ok(true);
        }

        let report = Variation::from_options(&self.options).apply(
            &mut self.population,
            &self.operators,
            self.elite,
            &mut self.rng,
        );
        tracing::trace!(
            generation = self.generation,
            pairs = report.pairs,
            mutations = report.mutations,
            "variation applied"
        );

        Ok(false)
    }

    /// Evolves until a termination condition holds and returns the result.
    #[tracing::instrument(level = "debug", skip_all, fields(
        population_size = self.options.get_population_size(),
        max_generations = self.options.get_max_generations(),
    ))]
    pub fn run(&mut self) -> Result<EvolutionResult<O::Value, O::Fitness>> {
        while !self.step()? {}
        self.result()
    }

    /// Snapshot of the elite, the evaluated population and the counters.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Evolution` if no generation has run yet.
    pub fn result(&self) -> Result<EvolutionResult<O::Value, O::Fitness>> {
        let elite = self.elite_individual()?;
        let fitness = elite.fitness().cloned().ok_or_else_genetic(|| {
            GeneticError::Evolution("Elite has not been evaluated".to_string())
        })?;

        let population = self
            .population
            .iter()
            .filter_map(|(_, individual)| {
                individual
                    .fitness()
                    .map(|fitness| (individual.value().clone(), fitness.clone()))
            })
            .collect();

        Ok(EvolutionResult {
            value: elite.value().clone(),
            fitness,
            population,
            history: self.history.clone(),
            generations: self.generation,
            stagnation_count: self.stagnation_count,
        })
    }

    fn should_terminate(&self) -> bool {
        if self.generation > self.options.get_max_generations() {
            return true;
        }
        self.options
            .stagnation_limit()
            .is_some_and(|limit| self.stagnation_count > limit)
    }

    fn elite_individual(&self) -> Result<&Individual<O::Value, O::Fitness>> {
        self.elite
            .and_then(|id| self.population.get(id))
            .ok_or_else_genetic(|| {
                GeneticError::Evolution("No elite has been selected yet".to_string())
            })
    }

    fn log_generation(&self, evaluated: usize) {
        let log_level = *self.options.get_log_level();
        if log_level == LogLevel::None {
            return;
        }

        tracing::info!(
            generation = self.generation,
            stagnation = self.stagnation_count,
            evaluated,
            elite = ?self.history.last(),
            "generation complete"
        );

        if log_level == LogLevel::Verbose {
            for (id, individual) in self.population.iter() {
                tracing::debug!(
                    generation = self.generation,
                    %id,
                    value = ?individual.value(),
                    fitness = ?individual.fitness(),
                    "member"
                );
            }
        }
    }

    /// The elite, once at least one generation has been selected.
    pub fn elite(&self) -> Option<&Individual<O::Value, O::Fitness>> {
        self.elite.and_then(|id| self.population.get(id))
    }

    pub fn elite_id(&self) -> Option<IndividualId> {
        self.elite
    }

    pub fn population(&self) -> &Population<O::Value, O::Fitness> {
        &self.population
    }

    /// Elite fitness per executed generation.
    pub fn history(&self) -> &[O::Fitness] {
        &self.history
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn stagnation_count(&self) -> usize {
        self.stagnation_count
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    pub fn operators(&self) -> &O {
        &self.operators
    }

    pub fn selection(&self) -> &S {
        &self.selection
    }
}

impl<O, D> Solver<O, ParetoSelection<D>>
where
    O: Operators<Fitness = Vec<f64>>,
    D: Dominance,
{
    /// Fitness vectors of the current non-dominated members.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::DimensionMismatch` if members disagree on the
    /// number of objectives.
    pub fn pareto_front(&self) -> Result<Vec<Vec<f64>>> {
        self.selection.front(&self.population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Direction, ElitistSelection};

    /// Maximizes `-(x - 3)^2`; mutation only moves `x` towards 3.
    #[derive(Debug)]
    struct Approach;

    impl Operators for Approach {
        type Value = f64;
        type Fitness = f64;

        fn initialize(&self, rng: &mut RandomNumberGenerator) -> f64 {
            rng.gen_range(0.0..10.0)
        }

        fn evaluate(&self, value: &f64) -> f64 {
            -(value - 3.0).powi(2)
        }

        fn crossover(&self, a: &f64, b: &f64, _rng: &mut RandomNumberGenerator) -> (f64, f64) {
            let mid = (a + b) / 2.0;
            (mid, mid)
        }

        fn mutate(&self, value: &mut f64, _rng: &mut RandomNumberGenerator) {
            *value = (*value + 3.0) / 2.0;
        }
    }

    #[derive(Debug)]
    struct Constant;

    impl Operators for Constant {
        type Value = u8;
        type Fitness = f64;

        fn initialize(&self, _rng: &mut RandomNumberGenerator) -> u8 {
            0
        }

        fn evaluate(&self, _value: &u8) -> f64 {
            1.0
        }

        fn crossover(&self, a: &u8, b: &u8, _rng: &mut RandomNumberGenerator) -> (u8, u8) {
            (*a, *b)
        }

        fn mutate(&self, _value: &mut u8, _rng: &mut RandomNumberGenerator) {}
    }

    fn options(
        population_size: usize,
        max_generations: usize,
        max_fail_times: i64,
    ) -> SolverOptions {
        SolverOptions::builder()
            .population_size(population_size)
            .max_generations(max_generations)
            .max_fail_times(max_fail_times)
            .build()
    }

    #[test]
    fn test_new_seeds_population() {
        let solver = Solver::new(
            options(12, 5, 0),
            Approach,
            ElitistSelection::default(),
            RandomNumberGenerator::from_seed(1),
        )
        .unwrap();

        assert_eq!(solver.population().len(), 12);
        assert_eq!(solver.population().stale_count(), 12);
        assert_eq!(solver.generation(), 0);
        assert!(solver.elite().is_none());
        assert!(solver.result().is_err());
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let result = Solver::new(
            options(0, 5, 0),
            Approach,
            ElitistSelection::default(),
            RandomNumberGenerator::from_seed(1),
        );
        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_generation_limit_bounds_the_run() {
        let mut solver = Solver::new(
            options(10, 7, 0),
            Approach,
            ElitistSelection::default(),
            RandomNumberGenerator::from_seed(2),
        )
        .unwrap();

        let result = solver.run().unwrap();

        assert_eq!(result.generations, 8);
        assert_eq!(result.history.len(), 8);
        assert!(solver.is_terminated());
        // Further steps are no-ops
        assert!(solver.step().unwrap());
        assert_eq!(solver.generation(), 8);
    }

    #[test]
    fn test_stagnation_limit_stops_early() {
        let mut solver = Solver::new(
            options(5, 1000, 3),
            Constant,
            ElitistSelection::default(),
            RandomNumberGenerator::from_seed(3),
        )
        .unwrap();

        let result = solver.run().unwrap();

        // Generation 1 improves on nothing; generations 2..=5 stagnate
        assert_eq!(result.generations, 5);
        assert_eq!(result.stagnation_count, 4);
    }

    #[test]
    fn test_elite_never_regresses_and_is_protected() {
        let mut solver = Solver::new(
            options(8, 30, 0),
            Approach,
            ElitistSelection::new(Direction::Maximize),
            RandomNumberGenerator::from_seed(4),
        )
        .unwrap();

        while !solver.step().unwrap() {
            let elite = solver.elite().unwrap();
            assert!(elite.is_evaluated());
            // Selection leaves the survivors plus the elite copy before variation
            assert!(solver.population().len() >= 9);
        }

        for window in solver.history().windows(2) {
            assert!(window[1] >= window[0]);
        }
    }

    #[test]
    fn test_initialize_resets_counters() {
        let mut solver = Solver::new(
            options(6, 3, 0),
            Approach,
            ElitistSelection::default(),
            RandomNumberGenerator::from_seed(5),
        )
        .unwrap();
        solver.run().unwrap();

        solver.initialize().unwrap();

        assert_eq!(solver.generation(), 0);
        assert_eq!(solver.stagnation_count(), 0);
        assert!(solver.history().is_empty());
        assert!(!solver.is_terminated());
        assert_eq!(solver.population().len(), 6);
    }
}
