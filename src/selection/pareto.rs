use crate::error::{GeneticError, Result};
use crate::population::{IndividualId, Population};
use crate::selection::crowding::crowding_order;
use crate::selection::dominance::{domination_matrix, pareto_layers, Dominance, StrictDominance};
use crate::selection::selection_strategy::{SelectionOutcome, SelectionStrategy};

/// Multi-objective survivor selection in the style of NSGA-II.
///
/// Members are split into dominance layers. Whole layers are kept in rank order
/// while they fit; the first layer that does not fit is cut down to the exact
/// target by descending crowding score, which keeps the most isolated members
/// of that layer.
///
/// The elite is a first-layer survivor. A survivor dominating the previous elite
/// counts as an improvement and becomes the new elite; otherwise the previous
/// elite stays if it survived, else the first first-layer survivor takes over.
///
/// # Examples
///
/// ```
/// use evogen::individual::Individual;
/// use evogen::population::Population;
/// use evogen::selection::{ParetoSelection, SelectionStrategy};
///
/// let mut population: Population<&str, Vec<f64>> = Population::new();
/// population.insert(Individual::with_fitness("a", vec![1.0, 4.0]));
/// population.insert(Individual::with_fitness("b", vec![4.0, 1.0]));
/// population.insert(Individual::with_fitness("c", vec![5.0, 5.0]));
///
/// // Objectives are minimized with strict dominance by default
/// let selection = ParetoSelection::default();
/// selection.select(&mut population, 2, None).unwrap();
///
/// let survivors: Vec<&str> = population.iter().map(|(_, i)| *i.value()).collect();
/// assert_eq!(survivors, vec!["a", "b"]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParetoSelection<D = StrictDominance> {
    dominance: D,
}

impl Default for ParetoSelection<StrictDominance> {
    /// Strict dominance with every objective minimized.
    fn default() -> Self {
        Self {
            dominance: StrictDominance::default(),
        }
    }
}

impl<D> ParetoSelection<D>
where
    D: Dominance,
{
    pub fn new(dominance: D) -> Self {
        Self { dominance }
    }

    pub fn dominance(&self) -> &D {
        &self.dominance
    }

    /// Fitness vectors of the current non-dominated members.
    ///
    /// Members that have not been evaluated yet are ignored.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::DimensionMismatch` if the evaluated members do not
    /// all have the same number of objectives.
    pub fn front<V>(&self, population: &Population<V, Vec<f64>>) -> Result<Vec<Vec<f64>>> {
        non_dominated_front(population, &self.dominance)
    }
}

/// Fitness vectors of the evaluated members that form the first dominance layer.
///
/// # Errors
///
/// Returns `GeneticError::DimensionMismatch` if the evaluated members do not all
/// have the same number of objectives.
pub fn non_dominated_front<V, D>(
    population: &Population<V, Vec<f64>>,
    dominance: &D,
) -> Result<Vec<Vec<f64>>>
where
    D: Dominance + ?Sized,
{
    let objectives: Vec<&Vec<f64>> = population
        .iter()
        .filter_map(|(_, individual)| individual.fitness())
        .collect();

    if let Some(first) = objectives.first() {
        if let Some(ragged) = objectives.iter().find(|o| o.len() != first.len()) {
            return Err(GeneticError::DimensionMismatch {
                expected: first.len(),
                found: ragged.len(),
            });
        }
    }

    let matrix = domination_matrix(&objectives, dominance);
    let front = pareto_layers(&matrix)
        .into_iter()
        .next()
        .map(|layer| layer.into_iter().map(|idx| objectives[idx].clone()).collect())
        .unwrap_or_default();
    Ok(front)
}

impl<D> SelectionStrategy<Vec<f64>> for ParetoSelection<D>
where
    D: Dominance,
{
    fn select<V>(
        &self,
        population: &mut Population<V, Vec<f64>>,
        population_size: usize,
        previous_elite: Option<IndividualId>,
    ) -> Result<SelectionOutcome>
    where
        V: Clone,
    {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        if population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        let (ids, objectives) = collect_objectives(population)?;

        let matrix = domination_matrix(&objectives, &self.dominance);
        let layers = pareto_layers(&matrix);

        let mut selected: Vec<usize> = Vec::with_capacity(population_size);
        let mut front_len = 0;

        for (rank, layer) in layers.iter().enumerate() {
            let room = population_size - selected.len();
            if room == 0 {
                break;
            }

            let taken = if layer.len() <= room {
                selected.extend_from_slice(layer);
                layer.len()
            } else {
                let layer_objectives: Vec<&Vec<f64>> =
                    layer.iter().map(|&idx| objectives[idx]).collect();
                selected.extend(
                    crowding_order(&layer_objectives)
                        .into_iter()
                        .take(room)
                        .map(|position| layer[position]),
                );
                room
            };

            if rank == 0 {
                front_len = taken;
            }
        }

        tracing::trace!(
            layers = layers.len(),
            front = layers.first().map_or(0, Vec::len),
            selected = selected.len(),
            "pareto layering complete"
        );

        let previous = previous_elite.and_then(|id| {
            population
                .get(id)
                .and_then(|individual| individual.fitness())
                .map(|fitness| (id, fitness.clone()))
        });

        let front = &selected[..front_len];
        let (elite_idx, improved) = match previous {
            None => (front[0], true),
            Some((previous_id, previous_fitness)) => {
                let dominating = front
                    .iter()
                    .copied()
                    .find(|&idx| self.dominance.dominates(objectives[idx], &previous_fitness));

                match dominating {
                    Some(idx) => (idx, true),
                    None => {
                        let kept = selected.iter().copied().find(|&idx| ids[idx] == previous_id);
                        (kept.unwrap_or(front[0]), false)
                    }
                }
            }
        };
        let elite = ids[elite_idx];

        let mut keep = vec![false; ids.len()];
        for &idx in &selected {
            keep[idx] = true;
        }
        for (idx, id) in ids.iter().enumerate() {
            if !keep[idx] {
                population.remove(*id);
            }
        }

        Ok(SelectionOutcome { elite, improved })
    }
}

/// Returns member ids and their objective vectors, in population order.
fn collect_objectives<V>(
    population: &Population<V, Vec<f64>>,
) -> Result<(Vec<IndividualId>, Vec<&Vec<f64>>)> {
    let mut ids = Vec::with_capacity(population.len());
    let mut objectives: Vec<&Vec<f64>> = Vec::with_capacity(population.len());

    for (id, individual) in population.iter() {
        let fitness = individual.fitness().ok_or_else(|| {
            GeneticError::Evolution(format!(
                "Individual {} reached selection without being evaluated",
                id
            ))
        })?;

        if let Some(first) = objectives.first() {
            if first.len() != fitness.len() {
                return Err(GeneticError::DimensionMismatch {
                    expected: first.len(),
                    found: fitness.len(),
                });
            }
        } else if fitness.is_empty() {
            return Err(GeneticError::Configuration(
                "Objective vectors must contain at least one objective".to_string(),
            ));
        }

        ids.push(id);
        objectives.push(fitness);
    }

    Ok((ids, objectives))
}
