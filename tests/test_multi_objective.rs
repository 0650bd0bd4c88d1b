use evogen::{
    error::GeneticError,
    evolution::{Solver, SolverOptions},
    individual::Individual,
    operators::Operators,
    population::Population,
    rng::RandomNumberGenerator,
    selection::{
        crowding_distance, domination_matrix, pareto_layers, Direction, ParetoDominance,
        ParetoSelection, SelectionStrategy, StrictDominance,
    },
};

/// Schaffer's first problem: minimize `x^2` and `(x - 2)^2`.
/// Every `x` in `[0, 2]` is Pareto optimal.
#[derive(Debug)]
struct Schaffer;

impl Operators for Schaffer {
    type Value = f64;
    type Fitness = Vec<f64>;

    fn initialize(&self, rng: &mut RandomNumberGenerator) -> f64 {
        rng.gen_range(-10.0..10.0)
    }

    fn evaluate(&self, value: &f64) -> Vec<f64> {
        vec![value.powi(2), (value - 2.0).powi(2)]
    }

    fn crossover(&self, a: &f64, b: &f64, rng: &mut RandomNumberGenerator) -> (f64, f64) {
        let t: f64 = rng.gen_range(0.0..1.0);
        (t * a + (1.0 - t) * b, (1.0 - t) * a + t * b)
    }

    fn mutate(&self, value: &mut f64, rng: &mut RandomNumberGenerator) {
        let delta: f64 = rng.gen_range(-0.5..0.5);
        *value += delta;
    }
}

fn random_population(
    size: usize,
    objectives: usize,
    rng: &mut RandomNumberGenerator,
) -> Population<usize, Vec<f64>> {
    (0..size)
        .map(|idx| {
            let fitness: Vec<f64> = (0..objectives).map(|_| rng.gen_range(0.0..10.0)).collect();
            Individual::with_fitness(idx, fitness)
        })
        .collect()
}

#[test]
fn test_schaffer_front_lies_on_the_pareto_set() {
    let options = SolverOptions::builder()
        .population_size(40)
        .max_generations(100)
        .max_fail_times(0)
        .mutate_prob(0.1)
        .build();
    let mut solver = Solver::new(
        options,
        Schaffer,
        ParetoSelection::default(),
        RandomNumberGenerator::from_seed(17),
    )
    .unwrap();

    let result = solver.run().unwrap();
    assert_eq!(result.generations, 101);
    assert_eq!(result.history.len(), 101);

    let front = solver.pareto_front().unwrap();
    assert!(!front.is_empty());
    for objectives in &front {
        // Both objectives at most 6.25 means x lies within [-0.5, 2.5]
        assert!(objectives[0] <= 6.25 && objectives[1] <= 6.25, "{:?}", objectives);
    }

    let elite = solver.elite().unwrap();
    assert!(front.contains(elite.fitness().unwrap()));
}

#[test]
fn test_textbook_dominance_solver_keeps_size() {
    let options = SolverOptions::builder()
        .population_size(24)
        .max_generations(30)
        .build();
    let mut solver = Solver::new(
        options,
        Schaffer,
        ParetoSelection::new(ParetoDominance::new(Direction::Minimize)),
        RandomNumberGenerator::from_seed(5),
    )
    .unwrap();

    let result = solver.run().unwrap();

    assert_eq!(result.population.len(), 24);
    assert!(result.population.iter().all(|(_, f)| f.len() == 2));
}

#[test]
fn test_selection_size_invariant() {
    let mut rng = RandomNumberGenerator::from_seed(99);
    let selection = ParetoSelection::default();

    for (size, target) in [(1, 1), (5, 3), (30, 10), (30, 30), (12, 20), (60, 17)] {
        let mut population = random_population(size, 3, &mut rng);

        let outcome = selection.select(&mut population, target, None).unwrap();

        assert_eq!(population.len(), size.min(target));
        assert!(population.contains(outcome.elite));
    }
}

#[test]
fn test_layers_partition_random_populations() {
    let mut rng = RandomNumberGenerator::from_seed(7);

    for size in [2, 9, 50] {
        let objectives: Vec<Vec<f64>> = (0..size)
            .map(|_| (0..2).map(|_| rng.gen_range(0.0..5.0)).collect())
            .collect();

        let dominance = StrictDominance::new(Direction::Minimize);
        let matrix = domination_matrix(&objectives, &dominance);
        let layers = pareto_layers(&matrix);

        let mut members: Vec<usize> = layers.iter().flatten().copied().collect();
        members.sort_unstable();
        assert_eq!(members, (0..size).collect::<Vec<_>>());

        for (rank, layer) in layers.iter().enumerate() {
            assert!(!layer.is_empty());
            for &i in layer {
                for &j in layer {
                    assert!(!matrix.dominates(i, j));
                }
                // Every member below the first layer is dominated by the layer above
                if rank > 0 {
                    assert!(layers[rank - 1].iter().any(|&k| matrix.dominates(k, i)));
                }
            }
        }
    }
}

#[test]
fn test_crowding_boundaries_are_infinite() {
    let scores = crowding_distance(&[vec![1.0], vec![2.0], vec![5.0]]);
    assert!(scores[0].is_infinite());
    assert_eq!(scores[1], 4.0);
    assert!(scores[2].is_infinite());
}

#[test]
fn test_unevaluated_member_cannot_be_selected() {
    let mut population: Population<usize, Vec<f64>> = Population::new();
    population.insert(Individual::with_fitness(0, vec![1.0, 1.0]));
    population.insert(Individual::new(1));

    let result = ParetoSelection::default().select(&mut population, 1, None);
    assert!(matches!(result, Err(GeneticError::Evolution(_))));
}
