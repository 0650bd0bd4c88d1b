//! # Evaluation
//!
//! Fills the fitness cache of every stale member. Members that are already
//! evaluated (the carried-over elite, children that were not mutated) are
//! skipped, so repeated evaluation of an unchanged individual costs nothing.
//!
//! When enough members are stale the work is spread over the rayon thread pool.
//! The call returns only after every evaluation finished, and the population's
//! structure is not touched while evaluation runs.

use rayon::prelude::*;

use crate::error::{GeneticError, Result};
use crate::individual::{Fitness, Individual};
use crate::operators::Operators;
use crate::population::{IndividualId, Population};

/// Evaluates every stale member and returns how many were evaluated.
///
/// # Errors
///
/// Returns `GeneticError::FitnessCalculation` if the operator yields a NaN or
/// infinite fitness. Members evaluated before the failure keep their fitness.
pub fn evaluate_population<O>(
    population: &mut Population<O::Value, O::Fitness>,
    operators: &O,
    parallel_threshold: usize,
) -> Result<usize>
where
    O: Operators,
{
    let stale = population.stale_count();
    if stale == 0 {
        return Ok(0);
    }

    if stale >= parallel_threshold {
        population
            .par_iter_mut()
            .filter(|(_, individual)| !individual.is_evaluated())
            .try_for_each(|(id, individual)| evaluate_one(*id, individual, operators))?;
    } else {
        for (id, individual) in population.iter_mut() {
            if !individual.is_evaluated() {
                evaluate_one(id, individual, operators)?;
            }
        }
    }

    Ok(stale)
}

fn evaluate_one<O>(
    id: IndividualId,
    individual: &mut Individual<O::Value, O::Fitness>,
    operators: &O,
) -> Result<()>
where
    O: Operators,
{
    let fitness = operators.evaluate(individual.value());

    // Check for invalid fitness scores
    if !fitness.is_finite() {
        return Err(GeneticError::FitnessCalculation(format!(
            "Non-finite fitness {:?} for individual {}",
            fitness, id
        )));
    }

    individual.set_fitness(fitness);
    Ok(())
}
