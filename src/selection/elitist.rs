use std::cmp::Ordering;

use crate::error::{GeneticError, OptionExt, Result};
use crate::population::{IndividualId, Population};
use crate::selection::direction::Direction;
use crate::selection::selection_strategy::{SelectionOutcome, SelectionStrategy};

/// Single-objective truncation selection with elitism.
///
/// This strategy sorts members by their scalar fitness, evicts the worst ones until
/// `population_size` remain, and re-inserts a copy of the best member as the elite.
/// The copy is what the variation stage protects, while the original stays an
/// ordinary member that may be recombined and mutated. Selection therefore leaves
/// `population_size + 1` members behind; the next pass trims the surplus.
///
/// `ElitistSelection::default()` maximizes fitness, unlike `Direction::default()`
/// and `ParetoSelection::default()`, which minimize. Use
/// [`with_lower_is_better`](Self::with_lower_is_better) or
/// `ElitistSelection::new(Direction::Minimize)` for minimization problems.
///
/// # Examples
///
/// ```
/// use evogen::individual::Individual;
/// use evogen::population::Population;
/// use evogen::selection::{ElitistSelection, SelectionStrategy};
///
/// let mut population: Population<f64, f64> = Population::new();
/// for (value, fitness) in [(1.0, 0.5), (2.0, 0.8), (3.0, 0.3)] {
///     population.insert(Individual::with_fitness(value, fitness));
/// }
///
/// // For minimization problems, lower fitness is better
/// let selection = ElitistSelection::default().with_lower_is_better();
/// let outcome = selection.select(&mut population, 2, None).unwrap();
///
/// assert_eq!(population.len(), 3); // two survivors plus the elite copy
/// assert_eq!(population.get(outcome.elite).unwrap().value(), &3.0);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElitistSelection {
    direction: Direction,
}

impl ElitistSelection {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }

    pub fn with_lower_is_better(mut self) -> Self {
        self.direction = Direction::Minimize;
        self
    }

    pub fn with_higher_is_better(mut self) -> Self {
        self.direction = Direction::Maximize;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Orders best first; NaN sorts behind every number.
    fn rank(&self, a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let cmp = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
                match self.direction {
                    Direction::Maximize => cmp.reverse(),
                    Direction::Minimize => cmp,
                }
            }
        }
    }
}

impl Default for ElitistSelection {
    /// Higher fitness is considered better. This differs from `Direction::default()`.
    fn default() -> Self {
        Self {
            direction: Direction::Maximize,
        }
    }
}

impl SelectionStrategy<f64> for ElitistSelection {
    fn select<V>(
        &self,
        population: &mut Population<V, f64>,
        population_size: usize,
        previous_elite: Option<IndividualId>,
    ) -> Result<SelectionOutcome>
    where
        V: Clone,
    {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let mut ranked: Vec<(IndividualId, f64)> = population
            .iter()
            .map(|(id, individual)| {
                individual.fitness().copied().map(|f| (id, f)).ok_or_else(|| {
                    GeneticError::Evolution(format!(
                        "Individual {} reached selection without being evaluated",
                        id
                    ))
                })
            })
            .collect::<Result<_>>()?;

        let previous_fitness = previous_elite
            .and_then(|id| population.get(id))
            .and_then(|individual| individual.fitness().copied());

        ranked.sort_by(|a, b| self.rank(a.1, b.1));

        if ranked.len() < population_size {
            tracing::warn!(
                available = ranked.len(),
                target = population_size,
                "population below target size at selection"
            );
        }

        for (id, _) in ranked.iter().skip(population_size) {
            population.remove(*id);
        }

        let (best_id, best_fitness) = ranked[0];
        let improved = previous_fitness.map_or(true, |previous| {
            self.direction.is_strictly_better(best_fitness, previous)
        });

        let elite_copy = population
            .get(best_id)
            .cloned()
            .ok_or_else_genetic(|| {
                GeneticError::Evolution(format!("Best individual {} was evicted", best_id))
            })?;
        let elite = population.insert(elite_copy);

        Ok(SelectionOutcome { elite, improved })
    }
}
