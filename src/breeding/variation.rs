//! # Variation
//!
//! The `Variation` stage produces the next generation's candidates from the
//! survivors of selection. Crossover first: every non-elite member joins the
//! mating pool with probability `crossover_prob`, the pool is shuffled and paired
//! off two at a time, and each pair adds two fresh children to the population.
//! Mutation second: every non-elite member, fresh children included, is mutated
//! in place with probability `mutate_prob`.
//!
//! Children and mutated members lose their cached fitness. The elite is never
//! touched, so its fitness stays valid across generations.

use crate::evolution::options::SolverOptions;
use crate::individual::Individual;
use crate::operators::Operators;
use crate::population::{IndividualId, Population};
use crate::rng::RandomNumberGenerator;

/// Counters describing one variation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariationReport {
    /// Number of parent pairs recombined (each pair adds two children).
    pub pairs: usize,
    /// Number of members mutated.
    pub mutations: usize,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variation {
    crossover_prob: f64,
    mutate_prob: f64,
}

impl Variation {
    pub fn new(crossover_prob: f64, mutate_prob: f64) -> Self {
        Self {
            crossover_prob,
            mutate_prob,
        }
    }

    pub fn from_options(options: &SolverOptions) -> Self {
        Self::new(options.get_crossover_prob(), options.get_mutate_prob())
    }

    /// Applies crossover and then mutation to every member except `elite`.
    pub fn apply<O>(
        &self,
        population: &mut Population<O::Value, O::Fitness>,
        operators: &O,
        elite: Option<IndividualId>,
        rng: &mut RandomNumberGenerator,
    ) -> VariationReport
    where
        O: Operators,
    {
        let pairs = self.crossover(population, operators, elite, rng);
        let mutations = self.mutate(population, operators, elite, rng);

        VariationReport { pairs, mutations }
    }

    /// Recombines randomly paired non-elite members and appends their children.
    ///
    /// Returns the number of recombined pairs.
    pub fn crossover<O>(
        &self,
        population: &mut Population<O::Value, O::Fitness>,
        operators: &O,
        elite: Option<IndividualId>,
        rng: &mut RandomNumberGenerator,
    ) -> usize
    where
        O: Operators,
    {
        let mut pool: Vec<IndividualId> = population
            .ids()
            .into_iter()
            .filter(|id| Some(*id) != elite)
            .filter(|_| rng.gen_probability(self.crossover_prob))
            .collect();
        rng.shuffle(&mut pool);

        let mut children = Vec::with_capacity(pool.len());
        for pair in pool.chunks_exact(2) {
            let parents = (population.get(pair[0]), population.get(pair[1]));
            let (Some(parent_a), Some(parent_b)) = parents else {
                continue;
            };
            let (child_a, child_b) = operators.crossover(parent_a.value(), parent_b.value(), rng);
            children.push(child_a);
            children.push(child_b);
        }

        let pairs = children.len() / 2;
        for child in children {
            population.insert(Individual::new(child));
        }
        pairs
    }

    /// Mutates non-elite members in place. Returns the number of mutated members.
    pub fn mutate<O>(
        &self,
        population: &mut Population<O::Value, O::Fitness>,
        operators: &O,
        elite: Option<IndividualId>,
        rng: &mut RandomNumberGenerator,
    ) -> usize
    where
        O: Operators,
    {
        let mut mutations = 0;
        for (id, individual) in population.iter_mut() {
            if Some(id) == elite || !rng.gen_probability(self.mutate_prob) {
                continue;
            }
            operators.mutate(individual.value_mut(), rng);
            mutations += 1;
        }
        mutations
    }
}
